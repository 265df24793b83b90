//! Version-conditional types from `LanguageLevelTypeAware`.
//!
//! ```php
//! #[LanguageLevelTypeAware(['7.0' => 'int', '8.0' => 'int|float'], default: 'int|float')]
//! ```
//!
//! Each `threshold => type` pair assigns its type to every registry version at
//! or above the threshold. Pairs are applied in source order, so a later pair
//! overwrites earlier assignments for the versions they share. The second
//! argument is recorded last under its own argument name.

use crate::canonical::CanonicalType;
use crate::error::ResolveError;
use crate::markers::{MarkerKind, find_marker, version_from_expr};
use crate::syntax::{AttributeGroup, Expr};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use stubcheck_common::{ResolverContext, Version};

/// Slot name used when the default argument is passed positionally.
pub const DEFAULT_SLOT: &str = "default";

/// `Foo[]` style array types; all of them canonicalize to `array`.
static BRACKET_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\[\]").expect("bracket array pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeMapKey {
    Version(Version),
    Named(String),
}

impl fmt::Display for TypeMapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(version) => write!(f, "{version}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Insertion-ordered map from version (or named slot) to canonical type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionedTypeMap {
    entries: IndexMap<TypeMapKey, CanonicalType>,
}

impl VersionedTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: TypeMapKey, ty: CanonicalType) {
        self.entries.insert(key, ty);
    }

    pub fn get(&self, key: &TypeMapKey) -> Option<&CanonicalType> {
        self.entries.get(key)
    }

    pub fn get_version(&self, version: Version) -> Option<&CanonicalType> {
        self.entries.get(&TypeMapKey::Version(version))
    }

    pub fn get_named(&self, name: &str) -> Option<&CanonicalType> {
        self.entries.get(&TypeMapKey::Named(name.to_string()))
    }

    /// The first named (non-version) entry, normally `default`.
    pub fn default_type(&self) -> Option<&CanonicalType> {
        self.entries.iter().find_map(|(key, ty)| match key {
            TypeMapKey::Named(_) => Some(ty),
            TypeMapKey::Version(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeMapKey, &CanonicalType)> {
        self.entries.iter()
    }

    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.entries.keys().filter_map(|key| match key {
            TypeMapKey::Version(version) => Some(*version),
            TypeMapKey::Named(_) => None,
        })
    }
}

impl Serialize for VersionedTypeMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, ty) in &self.entries {
            map.serialize_entry(&key.to_string(), ty)?;
        }
        map.end()
    }
}

/// Canonicalize a type expression from the marker: `Foo[]` becomes `array`,
/// then the text is split on `|`.
pub fn parse_type_expression(text: &str) -> CanonicalType {
    let rewritten = BRACKET_ARRAY_RE.replace_all(text, "array");
    CanonicalType::from_doc_text(&rewritten)
}

/// Build the versioned type map from a declaration's attribute groups.
///
/// Returns an empty map when no `LanguageLevelTypeAware` marker is present;
/// the caller then falls back to the signature type.
pub fn extract_versioned_types(
    groups: &[AttributeGroup],
    ctx: &ResolverContext,
) -> Result<VersionedTypeMap, ResolveError> {
    const KIND: MarkerKind = MarkerKind::LanguageLevelTypeAware;
    let marker_name = KIND.short_name();

    let mut map = VersionedTypeMap::new();
    let Some(marker) = find_marker(groups, KIND) else {
        return Ok(map);
    };

    let overrides = marker.args.first().ok_or(ResolveError::MissingArgument {
        marker: marker_name,
        index: 0,
    })?;
    let Expr::Array { items } = &overrides.value else {
        return Err(ResolveError::UnexpectedValue {
            marker: marker_name,
            position: "the version map",
            expected: "an array literal",
            found: overrides.value.kind_name(),
        });
    };

    let mut highest_threshold: Option<Version> = None;
    for item in items {
        let key = item.key.as_ref().ok_or(ResolveError::UnexpectedValue {
            marker: marker_name,
            position: "a version map key",
            expected: "a version literal",
            found: "no key",
        })?;
        let threshold = version_from_expr(key, KIND, "a version map key")?;
        let Expr::String { value: type_text } = &item.value else {
            return Err(ResolveError::UnexpectedValue {
                marker: marker_name,
                position: "a version map value",
                expected: "a type string",
                found: item.value.kind_name(),
            });
        };

        match highest_threshold {
            Some(highest) if threshold < highest => {
                // Kept in source order; sorting would change which type wins.
                tracing::warn!(
                    %threshold,
                    previous = %highest,
                    "LanguageLevelTypeAware thresholds are not in ascending order"
                );
            }
            _ => highest_threshold = Some(threshold),
        }

        let ty = parse_type_expression(type_text);
        for version in ctx.registry().at_or_above(threshold) {
            tracing::trace!(%version, ty = %ty, "versioned type assignment");
            map.insert(TypeMapKey::Version(version), ty.clone());
        }
    }

    let default = marker.args.get(1).ok_or(ResolveError::MissingArgument {
        marker: marker_name,
        index: 1,
    })?;
    let Expr::String { value: default_text } = &default.value else {
        return Err(ResolveError::UnexpectedValue {
            marker: marker_name,
            position: "the default type",
            expected: "a type string",
            found: default.value.kind_name(),
        });
    };
    let slot = default.name.clone().unwrap_or_else(|| DEFAULT_SLOT.to_string());
    map.insert(TypeMapKey::Named(slot), parse_type_expression(default_text));

    tracing::debug!(entries = map.len(), "resolved LanguageLevelTypeAware types");
    Ok(map)
}

#[cfg(test)]
#[path = "../tests/versioned_types_tests.rs"]
mod tests;
