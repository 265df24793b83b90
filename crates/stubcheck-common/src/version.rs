//! Runtime versions and the version registry.
//!
//! Versions are compared as floating-point numbers, exactly the way the stub
//! metadata writes them (`"7.4"`, `8.1`). `8.1` and `8.10` are the same version;
//! `8.1` and `8.1000001` are not.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runtime versions known to the default registry, oldest first.
pub const DEFAULT_VERSIONS: &[f64] = &[
    5.3, 5.4, 5.5, 5.6, 7.0, 7.1, 7.2, 7.3, 7.4, 8.0, 8.1, 8.2, 8.3, 8.4,
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VersionError {
    #[error("invalid version literal `{0}`")]
    InvalidLiteral(String),

    #[error("version must be a finite number, got {0}")]
    NotFinite(f64),

    #[error("version registry must contain at least one version")]
    EmptyRegistry,
}

/// A runtime version such as `7.4` or `8.1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "VersionRepr", into = "f64")]
pub struct Version(OrderedFloat<f64>);

impl Version {
    pub fn new(value: f64) -> Result<Self, VersionError> {
        if !value.is_finite() {
            return Err(VersionError::NotFinite(value));
        }
        Ok(Self(OrderedFloat(value)))
    }

    /// Parse a version literal the way a float cast reads it.
    ///
    /// Surrounding whitespace is ignored; anything that is not a number is an error.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| VersionError::InvalidLiteral(text.to_string()))?;
        Self::new(value)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0.into_inner()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Version {
    type Error = VersionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Version> for f64 {
    fn from(version: Version) -> Self {
        version.value()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value();
        let one_decimal = format!("{value:.1}");
        // Only shorten when nothing is lost, so 8.1000001 never prints as 8.1.
        if one_decimal.parse::<f64>().ok() == Some(value) {
            f.write_str(&one_decimal)
        } else {
            write!(f, "{value}")
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VersionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<VersionRepr> for Version {
    type Error = VersionError;

    fn try_from(repr: VersionRepr) -> Result<Self, Self::Error> {
        match repr {
            VersionRepr::Number(value) => Self::new(value),
            VersionRepr::Text(text) => Self::parse(&text),
        }
    }
}

/// Ordered, deduplicated set of every runtime version the system tracks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionRegistry {
    versions: Vec<Version>,
}

impl VersionRegistry {
    /// Build a registry from any collection of versions. Order and duplicates
    /// in the input do not matter; an empty input is rejected.
    pub fn new(versions: impl IntoIterator<Item = Version>) -> Result<Self, VersionError> {
        let mut versions: Vec<Version> = versions.into_iter().collect();
        versions.sort_unstable();
        versions.dedup();
        if versions.is_empty() {
            return Err(VersionError::EmptyRegistry);
        }
        Ok(Self { versions })
    }

    /// The earliest known version.
    pub fn first(&self) -> Version {
        self.versions[0]
    }

    /// The latest known version.
    pub fn latest(&self) -> Version {
        self.versions[self.versions.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Version> + '_ {
        self.versions.iter().copied()
    }

    pub fn as_slice(&self) -> &[Version] {
        &self.versions
    }

    pub fn contains(&self, version: Version) -> bool {
        self.versions.binary_search(&version).is_ok()
    }

    /// Every registry version numerically greater than or equal to `threshold`.
    pub fn at_or_above(&self, threshold: Version) -> impl Iterator<Item = Version> + '_ {
        let start = self.versions.partition_point(|v| *v < threshold);
        self.versions[start..].iter().copied()
    }

    /// Every registry version inside the inclusive interval `[from, to]`.
    pub fn between(&self, from: Version, to: Version) -> impl Iterator<Item = Version> + '_ {
        self.iter().filter(move |v| *v >= from && *v <= to)
    }

    /// The greatest registry version strictly below `version`, if any.
    pub fn predecessor(&self, version: Version) -> Option<Version> {
        let idx = self.versions.partition_point(|v| *v < version);
        idx.checked_sub(1).map(|i| self.versions[i])
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self {
            versions: DEFAULT_VERSIONS
                .iter()
                .map(|&v| Version(OrderedFloat(v)))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for VersionRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let versions = Vec::<Version>::deserialize(deserializer)?;
        Self::new(versions).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../tests/version_tests.rs"]
mod tests;
