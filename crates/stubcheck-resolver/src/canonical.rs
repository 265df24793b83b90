//! Canonical type representation.
//!
//! A canonical type is the ordered list of type names both sources are
//! reduced to before comparison. Order mirrors the union as declared, a
//! leading `?` marks a nullable name, and an empty list means "no type
//! information", not "untyped".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Prefix marking a nullable type name.
pub const NULLABLE_PREFIX: char = '?';

/// The one type name that never carries the nullable prefix.
pub const MIXED: &str = "mixed";

/// Separator between union members in the textual form.
pub const UNION_SEPARATOR: char = '|';

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalType(SmallVec<[String; 2]>);

impl CanonicalType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(name: impl Into<String>) -> Self {
        let mut names = SmallVec::new();
        names.push(name.into());
        Self(names)
    }

    /// Split doc-comment type text on `|` without further interpretation.
    ///
    /// Empty text carries no type information and yields an empty type.
    pub fn from_doc_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        text.split(UNION_SEPARATOR).map(str::to_string).collect()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn append(&mut self, other: CanonicalType) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{UNION_SEPARATOR}")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl FromIterator<String> for CanonicalType {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for CanonicalType {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
#[path = "../tests/canonical_tests.rs"]
mod tests;
