//! # List Subcommand
//!
//! One line per loaded module: name, version, maintainer.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use crate::LoadArgs;

/// Arguments for `poseidon list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}

/// Execute the list subcommand. Any load failure is an error.
pub fn run_list(args: &ListArgs, out: &mut impl Write) -> Result<u8> {
    let validator = args.load.validator()?;
    let registry = args
        .load
        .load(&validator)
        .with_context(|| format!("failed to load modules under {}", args.load.root.display()))?;

    for module in &registry {
        writeln!(
            out,
            "{}\t{}\t{} <{}>",
            module.module_name(),
            module.version(),
            module.maintainer(),
            module.maintainer_email()
        )?;
    }
    tracing::info!(count = registry.len(), "listed modules");
    Ok(0)
}
