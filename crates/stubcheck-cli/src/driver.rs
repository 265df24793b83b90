//! Command execution: load inputs, resolve, write JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::Path;

use crate::args::{Command, ContextArgs, ResolveArgs};
use stubcheck_common::{MutedProblemCatalog, ResolverContext, StubcheckConfig, Version};
use stubcheck_resolver::reflection::ReflectionObject;
use stubcheck_resolver::syntax::DeclarationNode;
use stubcheck_resolver::{
    DeclaredElement, RangeAvailability, is_valid_for_current_version, mark_duplicates,
    resolve_declaration, resolve_reflection,
};

/// One resolved element plus its compatibility verdict.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub element: DeclaredElement,
    pub valid_for_current_version: bool,
}

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub current_version: Version,
    pub stubs: Vec<ReportEntry>,
    pub reflection: Vec<ReportEntry>,
}

#[derive(Debug, Serialize)]
pub struct VersionsReport {
    pub versions: Vec<Version>,
    pub current_version: Version,
    pub separator: String,
}

/// Build the resolver context: config file, then environment, then flags.
pub fn build_context(
    args: &ContextArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResolverContext> {
    let mut config = match &args.config {
        Some(path) => StubcheckConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => StubcheckConfig::default(),
    };
    if let Some(separator) = &args.separator {
        config.separator = Some(separator.clone());
    }

    let mut ctx = config
        .into_context(lookup)
        .context("failed to build resolver context")?;
    if let Some(version) = args.runtime_version {
        ctx = ctx.with_current_version(version);
    }
    tracing::debug!(
        current_version = %ctx.current_version(),
        versions = ctx.registry().len(),
        "resolver context ready"
    );
    Ok(ctx)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {what} {}", path.display()))
}

pub fn resolve(args: &ResolveArgs, ctx: &ResolverContext) -> Result<ResolveReport> {
    let muted = match &args.muted {
        Some(path) => MutedProblemCatalog::load(path)
            .with_context(|| format!("failed to load muted problems {}", path.display()))?,
        None => MutedProblemCatalog::new(),
    };

    let declarations: Vec<DeclarationNode> = read_json(&args.stubs, "stub declarations")?;
    let reflected: Vec<ReflectionObject> = match &args.reflection {
        Some(path) => read_json(path, "reflection dump")?,
        None => Vec::new(),
    };

    let mut stubs: Vec<DeclaredElement> = declarations
        .iter()
        .map(|node| resolve_declaration(node, ctx, &muted))
        .collect();
    mark_duplicates(&mut stubs);
    let reflection: Vec<DeclaredElement> = reflected
        .iter()
        .map(|object| resolve_reflection(object, ctx))
        .collect();

    let failures = stubs.iter().filter(|e| e.parse_error().is_some()).count();
    tracing::info!(
        stubs = stubs.len(),
        reflection = reflection.len(),
        failures,
        "resolved inputs"
    );

    let lookup = RangeAvailability::new(ctx.registry());
    let entries = |elements: Vec<DeclaredElement>| -> Vec<ReportEntry> {
        elements
            .into_iter()
            .map(|element| ReportEntry {
                valid_for_current_version: is_valid_for_current_version(&element, &lookup, ctx),
                element,
            })
            .collect()
    };

    Ok(ResolveReport {
        current_version: ctx.current_version(),
        stubs: entries(stubs),
        reflection: entries(reflection),
    })
}

pub fn versions(ctx: &ResolverContext) -> VersionsReport {
    VersionsReport {
        versions: ctx.registry().iter().collect(),
        current_version: ctx.current_version(),
        separator: ctx.separator().to_string(),
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out).context("failed to write output")?;
    Ok(())
}

/// Run a parsed command against an injectable environment, writing JSON to `out`.
pub fn run(
    command: &Command,
    lookup: impl Fn(&str) -> Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Resolve(args) => {
            let ctx = build_context(&args.context, lookup)?;
            let report = resolve(args, &ctx)?;
            write_json(out, &report, args.context.pretty)
        }
        Command::Versions(args) => {
            let ctx = build_context(args, lookup)?;
            write_json(out, &versions(&ctx), args.pretty)
        }
    }
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
