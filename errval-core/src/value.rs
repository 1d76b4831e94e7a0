//! The error value record

use crate::error::{ContractError, Result};
use crate::table::ExpectationTable;
use crate::tag::TypeTag;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A failure that is returned instead of raised
///
/// An error value names an error kind, explains why it occurred and lists,
/// per argument position, the types that should produce it. It is immutable
/// once built; clones share the same record and compare equal under
/// [`ErrorValue::ptr_eq`].
#[derive(Clone)]
pub struct ErrorValue {
    inner: Arc<Inner>,
}

#[derive(PartialEq, Eq)]
struct Inner {
    expectation: ExpectationTable,
    kind: TypeTag,
    cause: String,
}

impl ErrorValue {
    /// Build an error value, checking that `kind` describes an error type
    pub fn new(
        expectation: ExpectationTable,
        kind: TypeTag,
        cause: impl Into<String>,
    ) -> Result<Self> {
        if !kind.is_throwable() {
            log::debug!("rejected error kind {}", kind.path());
            return Err(ContractError::Violation(format!(
                "error must be a throwable type, got '{}'",
                kind.name()
            )));
        }

        Ok(Self::from_parts(expectation, kind, cause.into()))
    }

    /// Build an error value of kind `E`
    pub fn for_error<E: std::error::Error + 'static>(
        expectation: ExpectationTable,
        cause: impl Into<String>,
    ) -> Self {
        Self::from_parts(expectation, TypeTag::error::<E>(), cause.into())
    }

    fn from_parts(expectation: ExpectationTable, kind: TypeTag, cause: String) -> Self {
        Self {
            inner: Arc::new(Inner {
                expectation,
                kind,
                cause,
            }),
        }
    }

    /// The expectation table
    pub fn expectation(&self) -> &ExpectationTable {
        &self.inner.expectation
    }

    /// The error kind
    pub fn kind(&self) -> TypeTag {
        self.inner.kind
    }

    /// Human-readable cause
    pub fn cause(&self) -> &str {
        &self.inner.cause
    }

    /// Whether both handles refer to the same record
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Materialise the error this value stands for
    pub fn raise(&self) -> Raised {
        Raised {
            kind: self.kind(),
            cause: self.cause().to_string(),
        }
    }

    /// One representative type name per position
    ///
    /// Sets iterate in name order, so the last name wins.
    fn flattened(&self) -> BTreeMap<usize, Cow<'static, str>> {
        let mut flat = BTreeMap::new();
        for (position, tags) in self.expectation() {
            for tag in tags {
                flat.insert(*position, tag.name());
            }
        }
        flat
    }
}

impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner == other.inner
    }
}

impl Eq for ErrorValue {}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorValue(expect={")?;
        for (i, (position, name)) in self.flattened().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{position}: {}", Quoted(&name))?;
        }
        write!(
            f,
            "}}, error={}, cause={})",
            Quoted(&self.kind().name()),
            Quoted(self.cause())
        )
    }
}

// Debug output is the same as Display.
impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for ErrorValue {}

/// Quoted text
///
/// Uses single quotes unless the text holds a single quote and no double
/// quote, in which case double quotes are used. Only the chosen quote,
/// backslashes and line controls are escaped.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.0.contains('\'') && !self.0.contains('"') {
            '"'
        } else {
            '\''
        };

        write!(f, "{quote}")?;
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                _ if c == quote => write!(f, "\\{c}")?,
                _ => write!(f, "{c}")?,
            }
        }
        write!(f, "{quote}")
    }
}

/// The error an [`ErrorValue`] stands for, raised after the fact
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {cause}")]
pub struct Raised {
    /// Kind of the originating error value
    pub kind: TypeTag,
    /// Cause copied from the originating error value
    pub cause: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::ParseIntError;

    fn parse_failure() -> ErrorValue {
        ErrorValue::for_error::<ParseIntError>(
            ExpectationTable::new().with_type::<i32>(0),
            "input was not a number",
        )
    }

    #[test]
    fn test_fields_are_retrievable() {
        let table = ExpectationTable::new().with_type::<i32>(0).with_type::<String>(1);
        let value = ErrorValue::new(table.clone(), TypeTag::error::<ParseIntError>(), "bad")
            .unwrap();
        assert_eq!(value.expectation(), &table);
        assert_eq!(value.kind(), TypeTag::of::<ParseIntError>());
        assert_eq!(value.cause(), "bad");
    }

    #[test]
    fn test_non_throwable_kind_is_rejected() {
        let result = ErrorValue::new(ExpectationTable::new(), TypeTag::of::<i32>(), "bad");
        match result {
            Err(ContractError::Violation(msg)) => assert!(msg.contains("throwable")),
            other => panic!("Expected Violation, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let value = ErrorValue::for_error::<ParseIntError>(
            ExpectationTable::new().with_type::<i32>(0).with_type::<String>(1),
            "it's broken",
        );
        assert_eq!(
            value.to_string(),
            "ErrorValue(expect={0: 'i32', 1: 'String'}, error='ParseIntError', cause=\"it's broken\")"
        );
        assert_eq!(format!("{value:?}"), value.to_string());
    }

    #[test]
    fn test_display_quoting() {
        let cause = |text: &str| {
            let value = ErrorValue::for_error::<ParseIntError>(ExpectationTable::new(), text);
            let shown = value.to_string();
            shown["ErrorValue(expect={}, error='ParseIntError', cause=".len()..shown.len() - 1]
                .to_string()
        };

        assert_eq!(cause("plain"), "'plain'");
        assert_eq!(cause("it's"), "\"it's\"");
        assert_eq!(cause("say \"hi\""), "'say \"hi\"'");
        assert_eq!(cause("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(cause("a\\b\nc"), "'a\\\\b\\nc'");
    }

    #[test]
    fn test_display_last_name_wins() {
        let value = ErrorValue::for_error::<ParseIntError>(
            ExpectationTable::new().with_type::<u8>(0).with_type::<i32>(0),
            "x",
        );
        assert!(value.to_string().starts_with("ErrorValue(expect={0: 'u8'}"));
    }

    #[test]
    fn test_display_empty_table() {
        let value = ErrorValue::for_error::<std::fmt::Error>(ExpectationTable::new(), "");
        assert_eq!(
            value.to_string(),
            "ErrorValue(expect={}, error='Error', cause='')"
        );
    }

    #[test]
    fn test_clones_share_identity() {
        let value = parse_failure();
        let copy = value.clone();
        assert!(value.ptr_eq(&copy));

        let twin = parse_failure();
        assert!(!value.ptr_eq(&twin));
        assert_eq!(value, twin);
    }

    #[test]
    fn test_raise() {
        let raised = parse_failure().raise();
        assert_eq!(raised.to_string(), "ParseIntError: input was not a number");
        assert_eq!(raised.kind, TypeTag::of::<ParseIntError>());
    }
}
