//! Declarative error value definitions
//!
//! Error values can be written down as JSON or TOML documents and loaded
//! against a [`TypeRegistry`]:
//!
//! ```toml
//! cause = "port must be given as text"
//! error = "ParseIntError"
//!
//! [expect]
//! 0 = ["u16", "i32"]
//! ```

use crate::error::{ApiError, Result};
use crate::registry::TypeRegistry;
use errval_core::{ContractError, ErrorValue, ExpectationTable, TypeTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Serializable form of an [`ErrorValue`]
///
/// Positions are kept as strings so that the same shape works for both
/// JSON objects and TOML tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Registered name of the error kind
    pub error: String,
    /// Human-readable cause
    pub cause: String,
    /// Guarded type names per position
    #[serde(default)]
    pub expect: BTreeMap<String, Vec<String>>,
}

impl Definition {
    /// Describe `value` with the names known to `registry`
    pub fn describe(value: &ErrorValue, registry: &TypeRegistry) -> Result<Self> {
        let name = |tag: TypeTag| {
            registry
                .name_of(tag)
                .map(str::to_string)
                .ok_or_else(|| ApiError::UnknownType {
                    name: tag.path().to_string(),
                })
        };

        let mut expect = BTreeMap::new();
        for (position, tags) in value.expectation() {
            let names = tags.iter().map(|tag| name(*tag)).collect::<Result<Vec<_>>>()?;
            expect.insert(position.to_string(), names);
        }

        Ok(Self {
            error: name(value.kind())?,
            cause: value.cause().to_string(),
            expect,
        })
    }

    /// Resolve the definition into an error value
    pub fn resolve(&self, registry: &TypeRegistry) -> Result<ErrorValue> {
        load_value(&serde_json::to_value(self)?, registry)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load an error value from a JSON document
pub fn from_json_str(json: &str, registry: &TypeRegistry) -> Result<ErrorValue> {
    let document: Value = serde_json::from_str(json)?;
    load_value(&document, registry)
}

/// Load an error value from a TOML document
pub fn from_toml_str(toml_str: &str, registry: &TypeRegistry) -> Result<ErrorValue> {
    let document: Value = toml::from_str(toml_str)?;
    load_value(&document, registry)
}

/// Validate a self-describing document and build an error value from it
///
/// Checks run in this order: the document and its `expect` entry are
/// mappings, every key is an integer and every value an array, keys are
/// non-negative, array items are type names, `error` names a throwable
/// type and `cause` is a string.
pub fn load_value(document: &Value, registry: &TypeRegistry) -> Result<ErrorValue> {
    let fields = document.as_object().ok_or_else(|| {
        ContractError::Violation("definition must be a mapping".to_string())
    })?;

    let expectation = match fields.get("expect") {
        None => ExpectationTable::new(),
        Some(Value::Object(entries)) => load_expectation(entries, registry)?,
        Some(_) => {
            return Err(ContractError::Violation("'expect' must be a mapping".to_string()).into())
        }
    };

    let kind = match fields.get("error") {
        Some(Value::String(name)) => registry.resolve(name)?,
        _ => return Err(not_throwable("missing or not a type name")),
    };
    if !kind.is_throwable() {
        return Err(not_throwable(&kind.name()));
    }

    let cause = match fields.get("cause") {
        Some(Value::String(cause)) => cause.clone(),
        other => {
            return Err(ContractError::TypeMismatch(format!(
                "'cause' must be a string, got {}",
                describe_json(other)
            ))
            .into())
        }
    };

    Ok(ErrorValue::new(expectation, kind, cause)?)
}

fn load_expectation(entries: &Map<String, Value>, registry: &TypeRegistry) -> Result<ExpectationTable> {
    let mut table = ExpectationTable::new();

    for (key, value) in entries {
        // Only canonical integer text, so "0", "00" and "+0" cannot share a position
        let canonical = key.parse::<i64>().ok().filter(|n| n.to_string() == *key);
        let (Some(key), Value::Array(items)) = (canonical, value) else {
            log::debug!("rejected expectation entry {key:?} => {value}");
            return Err(ContractError::TypeMismatch(
                "keys must be integers and values must be sets".to_string(),
            )
            .into());
        };

        let position = usize::try_from(key)
            .map_err(|_| ContractError::OutOfRange(format!("key {key} must be >= 0")))?;

        let mut tags = Vec::with_capacity(items.len());
        for item in items {
            let Value::String(name) = item else {
                return Err(ContractError::TypeMismatch(format!(
                    "set items must be types, got {item}"
                ))
                .into());
            };
            tags.push(registry.resolve(name)?);
        }

        table.insert(position, tags);
    }

    Ok(table)
}

fn not_throwable(what: &str) -> ApiError {
    ContractError::Violation(format!("error must be a throwable type: {what}")).into()
}

fn describe_json(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "an array",
        Some(Value::Object(_)) => "a mapping",
    }
}

/// Named error value definitions
///
/// A catalog document holds one `[errors.<name>]` table per definition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, ErrorValue>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    errors: BTreeMap<String, Value>,
}

impl Catalog {
    /// Load a catalog from a TOML document
    pub fn from_toml_str(toml_str: &str, registry: &TypeRegistry) -> Result<Self> {
        let document: CatalogDocument = toml::from_str(toml_str)?;

        let mut entries = BTreeMap::new();
        for (name, definition) in document.errors {
            let value = load_value(&definition, registry)
                .inspect_err(|e| log::debug!("catalog entry '{name}' failed to load: {e}"))?;
            entries.insert(name, value);
        }

        Ok(Self { entries })
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&ErrorValue> {
        self.entries.get(name)
    }

    /// Definition names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
