use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use tracing::{error, info};
use zmx_compiler::{Compiler, CompilerConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    if let Err(err) = run() {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    if let Some(arg) = std::env::args().nth(1) {
        anyhow::bail!("unexpected argument '{arg}'. usage: zmx");
    }

    let config = CompilerConfig::discover(Path::new(".")).context("failed to load config")?;
    let source_dir = config.source_dir.clone();

    let report = Compiler::new(config)
        .run()
        .with_context(|| format!("failed to compile '{}'", source_dir.display()))?;

    info!(components = report.components.len(), "compiled");
    Ok(())
}
