//! # Inspect Subcommand
//!
//! Streams the genotype data of each module (or one module with `--module`)
//! and prints individual, variant, and missing-call counts. Decoding stops at
//! the first error.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;

use poseidon_geno::FormatRegistry;
use poseidon_module::ModuleManifest;

use crate::LoadArgs;

/// Arguments for `poseidon inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Only inspect the module with this name.
    #[arg(long, value_name = "NAME")]
    pub module: Option<String>,
}

/// Counts gathered from one module's genotype stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeSummary {
    pub individuals: usize,
    pub variants: usize,
    pub missing_calls: usize,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, out: &mut impl Write) -> Result<u8> {
    let validator = args.load.validator()?;
    let registry = args
        .load
        .load(&validator)
        .with_context(|| format!("failed to load modules under {}", args.load.root.display()))?;

    let selected: Vec<&ModuleManifest> = match &args.module {
        Some(name) => match registry.get(name) {
            Some(module) => vec![module],
            None => bail!("no module named {name:?} under {}", args.load.root.display()),
        },
        None => registry.iter().collect(),
    };

    let formats = FormatRegistry::with_builtin();
    writeln!(out, "module\tformat\tindividuals\tvariants\tmissing")?;
    for module in selected {
        let summary = summarize(&formats, module).with_context(|| {
            format!("failed to decode genotype data of {}", module.module_name())
        })?;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            module.module_name(),
            module.genotype_data().format,
            summary.individuals,
            summary.variants,
            summary.missing_calls
        )?;
    }
    Ok(0)
}

/// Stream one module's genotype data to the end.
pub fn summarize(
    formats: &FormatRegistry,
    module: &ModuleManifest,
) -> Result<GenotypeSummary, poseidon_core::PoseidonError> {
    let mut stream = formats.open(&module.genotype_files())?;
    let mut missing_calls = 0;
    for record in stream.by_ref() {
        missing_calls += record?.missing_count();
    }
    Ok(GenotypeSummary {
        individuals: stream.individual_count(),
        variants: stream.rows_read(),
        missing_calls,
    })
}
