//! Muted validation problems.
//!
//! A muted problem is a known finding that is intentionally suppressed, either
//! for every runtime version (`"ALL"`) or for specific versions. Definitions
//! come from JSON shaped as an object keyed by problem kind,
//!
//! ```json
//! { "3": ["ALL"], "7": [8.0, "8.1"] }
//! ```
//!
//! or as an array of entries:
//!
//! ```json
//! [ { "kind": 3, "versions": ["ALL"] }, { "kind": 7, "versions": [8.0, 8.1] } ]
//! ```

use crate::version::Version;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Literal token that mutes a problem for every runtime version.
pub const ALL_VERSIONS_TOKEN: &str = "ALL";

#[derive(Debug, thiserror::Error)]
pub enum MutedProblemsError {
    #[error("failed to read muted problems {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid muted problems JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: String,
    },

    #[error("invalid problem kind `{0}`")]
    InvalidProblemKind(String),

    #[error("invalid version specifier `{0}`")]
    InvalidSpecifier(String),
}

/// Opaque discriminant of a validation-problem kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemKind(pub u32);

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Either every runtime version or one concrete version.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionSpecifier {
    All,
    Version(Version),
}

impl VersionSpecifier {
    pub fn from_json(value: &Value) -> Result<Self, MutedProblemsError> {
        match value {
            Value::String(text) if text == ALL_VERSIONS_TOKEN => Ok(Self::All),
            Value::String(text) => Version::parse(text)
                .map(Self::Version)
                .map_err(|_| MutedProblemsError::InvalidSpecifier(text.clone())),
            Value::Number(number) => number
                .as_f64()
                .and_then(|n| Version::new(n).ok())
                .map(Self::Version)
                .ok_or_else(|| MutedProblemsError::InvalidSpecifier(number.to_string())),
            other => Err(MutedProblemsError::InvalidSpecifier(other.to_string())),
        }
    }
}

impl Serialize for VersionSpecifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::All => serializer.serialize_str(ALL_VERSIONS_TOKEN),
            Self::Version(version) => version.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for VersionSpecifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Problem kind → version specifiers under which the problem is muted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MutedProblemMap {
    entries: BTreeMap<ProblemKind, BTreeSet<VersionSpecifier>>,
}

impl MutedProblemMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ProblemKind, specifier: VersionSpecifier) {
        self.entries.entry(kind).or_default().insert(specifier);
    }

    pub fn get(&self, kind: ProblemKind) -> Option<&BTreeSet<VersionSpecifier>> {
        self.entries.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProblemKind, &BTreeSet<VersionSpecifier>)> {
        self.entries.iter().map(|(kind, specs)| (*kind, specs))
    }

    /// See [`is_suppressed`].
    pub fn is_suppressed(&self, kind: ProblemKind, current: Version) -> bool {
        is_suppressed(kind, self, current)
    }

    pub fn from_json_str(text: &str) -> Result<Self, MutedProblemsError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Read either the object or the entry-array form.
    pub fn from_json(value: &Value) -> Result<Self, MutedProblemsError> {
        let mut map = Self::new();
        match value {
            Value::Object(object) => {
                for (key, specs) in object {
                    let kind = parse_problem_kind(&Value::String(key.clone()))?;
                    map.insert_all(kind, specs)?;
                }
            }
            Value::Array(entries) => {
                for entry in entries {
                    let Value::Object(entry) = entry else {
                        return Err(unexpected("an object entry", entry));
                    };
                    let kind = entry
                        .get("kind")
                        .ok_or_else(|| unexpected("a `kind` field", &Value::Object(entry.clone())))
                        .and_then(parse_problem_kind)?;
                    let specs = entry.get("versions").unwrap_or(&Value::Null);
                    map.insert_all(kind, specs)?;
                }
            }
            other => return Err(unexpected("an object or an array", other)),
        }
        Ok(map)
    }

    fn insert_all(&mut self, kind: ProblemKind, specs: &Value) -> Result<(), MutedProblemsError> {
        let Value::Array(specs) = specs else {
            return Err(unexpected("an array of version specifiers", specs));
        };
        // A kind listed with no versions is still recorded; it mutes nothing.
        self.entries.entry(kind).or_default();
        for spec in specs {
            self.insert(kind, VersionSpecifier::from_json(spec)?);
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for MutedProblemMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// True iff `kind` is muted in `map` for every version or exactly for
/// `current`. There is no range matching.
pub fn is_suppressed(kind: ProblemKind, map: &MutedProblemMap, current: Version) -> bool {
    match map.get(kind) {
        Some(specs) => {
            specs.contains(&VersionSpecifier::All)
                || specs.contains(&VersionSpecifier::Version(current))
        }
        None => false,
    }
}

/// Muted problems for many elements, keyed by qualified element name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutedProblemCatalog {
    by_name: FxHashMap<String, MutedProblemMap>,
}

impl MutedProblemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, map: MutedProblemMap) {
        self.by_name.insert(name.into(), map);
    }

    pub fn get(&self, name: &str) -> Option<&MutedProblemMap> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Parse `{ "<qualified name>": <muted problem map>, ... }`.
    pub fn from_json_str(text: &str) -> Result<Self, MutedProblemsError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(object) = value else {
            return Err(unexpected("an object keyed by element name", &value));
        };
        let mut catalog = Self::new();
        for (name, problems) in &object {
            catalog.insert(name.clone(), MutedProblemMap::from_json(problems)?);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, MutedProblemsError> {
        let text = std::fs::read_to_string(path).map_err(|source| MutedProblemsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

fn parse_problem_kind(value: &Value) -> Result<ProblemKind, MutedProblemsError> {
    let kind = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    kind.and_then(|k| u32::try_from(k).ok())
        .map(ProblemKind)
        .ok_or_else(|| match value {
            Value::String(text) => MutedProblemsError::InvalidProblemKind(text.clone()),
            other => MutedProblemsError::InvalidProblemKind(other.to_string()),
        })
}

fn unexpected(expected: &'static str, found: &Value) -> MutedProblemsError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    MutedProblemsError::UnexpectedShape {
        expected,
        found: found.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/problems_tests.rs"]
mod tests;
