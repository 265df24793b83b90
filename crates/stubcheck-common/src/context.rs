//! Resolver context and configuration.
//!
//! Every resolver entry point takes a [`ResolverContext`] explicitly instead of
//! reading process-wide state. A context is built from defaults, from the
//! environment, or from a JSON config file merged with the environment:
//!
//! ```json
//! { "versions": [7.4, 8.0, 8.1], "current_version": "8.0", "separator": "\\" }
//! ```
//!
//! `STUBCHECK_RUNTIME_VERSION` selects the targeted runtime version and takes
//! precedence over `PHP_VERSION` when both are set.

use crate::version::{Version, VersionError, VersionRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable naming the currently targeted runtime version.
pub const RUNTIME_VERSION_ENV: &str = "STUBCHECK_RUNTIME_VERSION";

/// Fallback variable read when `STUBCHECK_RUNTIME_VERSION` is unset.
pub const FALLBACK_RUNTIME_VERSION_ENV: &str = "PHP_VERSION";

/// Namespace separator used when joining multi-part names.
pub const DEFAULT_SEPARATOR: &str = "\\";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid version in config: {0}")]
    Version(#[from] VersionError),

    #[error("environment variable {var}={value:?} is not a version: {source}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        source: VersionError,
    },

    #[error("namespace separator must not be empty")]
    EmptySeparator,
}

/// Read-only inputs shared by every extraction: the version registry, the
/// currently targeted version and the namespace separator.
///
/// Cloning is cheap; the registry is shared.
#[derive(Clone, Debug)]
pub struct ResolverContext {
    registry: Arc<VersionRegistry>,
    current_version: Version,
    separator: String,
}

impl ResolverContext {
    pub fn new(registry: VersionRegistry, current_version: Version) -> Self {
        Self {
            registry: Arc::new(registry),
            current_version,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    pub fn with_current_version(mut self, current_version: Version) -> Self {
        self.current_version = current_version;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    pub fn current_version(&self) -> Version {
        self.current_version
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Build a context from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a context from an arbitrary variable lookup, using the default
    /// registry. The current version defaults to the registry's latest.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        StubcheckConfig::default().into_context(lookup)
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        let registry = VersionRegistry::default();
        let latest = registry.latest();
        Self::new(registry, latest)
    }
}

/// On-disk configuration. Every field is optional; missing fields fall back
/// to the environment and then to built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubcheckConfig {
    pub versions: Option<Vec<Version>>,
    pub current_version: Option<Version>,
    pub separator: Option<String>,
}

impl StubcheckConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Resolve the config into a context. An environment-provided runtime
    /// version overrides `current_version` from the file.
    pub fn into_context(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolverContext, ConfigError> {
        let registry = match self.versions {
            Some(versions) => VersionRegistry::new(versions)?,
            None => VersionRegistry::default(),
        };

        let current_version = match runtime_version_from(&lookup)? {
            Some(version) => version,
            None => self.current_version.unwrap_or_else(|| registry.latest()),
        };
        if !registry.contains(current_version) {
            tracing::warn!(
                %current_version,
                "current runtime version is not a registry member; version-scoped checks will never match"
            );
        }

        let separator = self
            .separator
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
        if separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }

        Ok(ResolverContext::new(registry, current_version).with_separator(separator))
    }
}

fn runtime_version_from(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<Version>, ConfigError> {
    for var in [RUNTIME_VERSION_ENV, FALLBACK_RUNTIME_VERSION_ENV] {
        let Some(value) = lookup(var) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        return Version::parse(&value)
            .map(Some)
            .map_err(|source| ConfigError::InvalidEnv { var, value, source });
    }
    Ok(None)
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;
