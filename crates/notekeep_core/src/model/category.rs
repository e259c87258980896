//! Ordered set of category names.
//!
//! # Invariants
//! - Names are unique by exact, case-sensitive comparison.
//! - Insertion order is preserved; removal keeps the relative order of the rest.

use crate::model::note::UNCATEGORIZED;

/// Categories every fresh store starts with.
pub const DEFAULT_CATEGORIES: &[&str] = &["Personal", "Work", "Ideas", "To-Do"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Builds a set from names, dropping later duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::empty();
        for name in names {
            set.insert(name);
        }
        set
    }

    /// Appends `name` if absent. Returns whether the set changed.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Removes `name` if present. Returns whether the set changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Returns whether a note may reference `name`.
    ///
    /// The fallback category is always accepted.
    pub fn is_valid_reference(&self, name: &str) -> bool {
        name == UNCATEGORIZED || self.contains(name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::from_names(DEFAULT_CATEGORIES.iter().copied())
    }
}
