use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use stubcheck_common::Version;

/// CLI arguments for the stubcheck binary.
#[derive(Parser, Debug)]
#[command(
    name = "stubcheck",
    version,
    about = "Version-aware type and availability resolver for PHP stubs"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve declaration and reflection dumps into comparable elements.
    Resolve(ResolveArgs),
    /// Print the version registry and the targeted runtime version.
    Versions(ContextArgs),
}

/// Options that shape the resolver context.
#[derive(Args, Debug, Default, Clone)]
pub struct ContextArgs {
    /// JSON config file with `versions`, `current_version` and `separator`.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Targeted runtime version. Overrides the config file and environment.
    #[arg(long = "runtime-version", value_name = "VERSION")]
    pub runtime_version: Option<Version>,

    /// Namespace separator used when joining multi-part names.
    #[arg(long)]
    pub separator: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// JSON array of declaration nodes produced by the stub parser.
    #[arg(short = 's', long)]
    pub stubs: PathBuf,

    /// JSON array of reflection objects dumped from the runtime.
    #[arg(short = 'r', long)]
    pub reflection: Option<PathBuf>,

    /// Muted-problem catalog keyed by qualified element name.
    #[arg(short = 'm', long)]
    pub muted: Option<PathBuf>,

    #[command(flatten)]
    pub context: ContextArgs,
}
