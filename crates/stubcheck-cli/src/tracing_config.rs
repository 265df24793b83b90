//! Tracing setup for the `stubcheck` binary.
//!
//! `STUBCHECK_LOG_FORMAT` picks the output format:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans and events via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! STUBCHECK_LOG=debug stubcheck resolve --stubs decls.json
//! STUBCHECK_LOG="stubcheck_resolver=trace" STUBCHECK_LOG_FORMAT=tree stubcheck resolve --stubs decls.json
//! ```
//!
//! Nothing is installed unless `STUBCHECK_LOG` or `RUST_LOG` is set. Output
//! always goes to stderr; stdout carries the resolved JSON.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "STUBCHECK_LOG";
pub const LOG_FORMAT_ENV: &str = "STUBCHECK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown or missing values fall back to `Text`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or_default().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Filter directives from `STUBCHECK_LOG`, else `RUST_LOG`. `None` when
/// neither is set.
pub fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup(LOG_ENV).or_else(|| lookup("RUST_LOG"))
}

/// Install the global subscriber if logging was requested.
pub fn init_tracing() {
    let lookup = |var: &str| std::env::var(var).ok();
    let Some(directives) = filter_directives(lookup) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);

    match LogFormat::parse(lookup(LOG_FORMAT_ENV).as_deref()) {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
