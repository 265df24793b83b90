use anyhow::Result;
use clap::Parser;

use stubcheck_cli::args::CliArgs;
use stubcheck_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // Only installs a subscriber when STUBCHECK_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    driver::run(&args.command, |var| std::env::var(var).ok(), &mut out)
}
