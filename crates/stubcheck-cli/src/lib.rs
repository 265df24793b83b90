//! Command-line driver for the stubcheck resolver.
//!
//! The binary is a thin wrapper over [`driver::run`]; everything here takes
//! its environment and output explicitly so it can be exercised in tests.

pub mod args;
pub mod driver;
pub mod tracing_config;
