//! Expectation tables
//!
//! An expectation table maps the position of a positional argument to the
//! set of runtime types that trigger an error value at that position.

use crate::error::{ContractError, Result};
use crate::tag::TypeTag;
use std::any::Any;
use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

/// Set of types guarded at a single position
pub type TypeSet = BTreeSet<TypeTag>;

/// Mapping from argument position to guarded types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectationTable {
    entries: BTreeMap<usize, TypeSet>,
}

impl ExpectationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from signed positions
    ///
    /// Fails with [`ContractError::OutOfRange`] on the first negative key.
    pub fn try_from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, S)>,
        S: IntoIterator<Item = TypeTag>,
    {
        let mut table = Self::new();
        for (key, tags) in entries {
            let position = usize::try_from(key).map_err(|_| {
                ContractError::OutOfRange(format!("key {key} must be >= 0"))
            })?;
            table.insert(position, tags);
        }
        Ok(table)
    }

    /// Add `tags` to the set guarded at `position`
    pub fn insert(&mut self, position: usize, tags: impl IntoIterator<Item = TypeTag>) {
        self.entries.entry(position).or_default().extend(tags);
    }

    /// Chaining form of [`insert`](Self::insert)
    pub fn with(mut self, position: usize, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.insert(position, tags);
        self
    }

    /// Guard `position` against values of type `T`
    pub fn with_type<T: Any>(self, position: usize) -> Self {
        self.with(position, [TypeTag::of::<T>()])
    }

    /// Number of guarded positions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no position is guarded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Types guarded at `position`
    pub fn get(&self, position: usize) -> Option<&TypeSet> {
        self.entries.get(&position)
    }

    /// Whether `value` has one of the types guarded at `position`
    pub fn is_listed(&self, position: usize, value: &dyn Any) -> bool {
        self.get(position)
            .is_some_and(|set| set.iter().any(|tag| tag.matches(value)))
    }

    /// Guarded positions in ascending order
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Entries in ascending position order
    pub fn iter(&self) -> btree_map::Iter<'_, usize, TypeSet> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ExpectationTable {
    type Item = (&'a usize, &'a TypeSet);
    type IntoIter = btree_map::Iter<'a, usize, TypeSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(usize, TypeSet)> for ExpectationTable {
    fn from_iter<I: IntoIterator<Item = (usize, TypeSet)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (position, tags) in iter {
            table.insert(position, tags);
        }
        table
    }
}
