//! Common types and utilities for stubcheck.
//!
//! This crate provides the foundational types shared by the resolver and the CLI:
//! - Runtime versions and the ordered version registry (`Version`, `VersionRegistry`)
//! - The explicit resolver context and its configuration (`ResolverContext`, `StubcheckConfig`)
//! - Problem kinds and muted-problem maps (`ProblemKind`, `MutedProblemMap`)

// Runtime versions and the registry of known versions
pub mod version;
pub use version::{Version, VersionError, VersionRegistry};

// Resolver context - current version, registry and name separator
pub mod context;
pub use context::{ConfigError, ResolverContext, StubcheckConfig};

// Muted (intentionally suppressed) validation problems
pub mod problems;
pub use problems::{
    MutedProblemCatalog, MutedProblemMap, MutedProblemsError, ProblemKind, VersionSpecifier,
    is_suppressed,
};
