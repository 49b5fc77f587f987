//! # Validate Subcommand
//!
//! Loads a whole corpus and reports whether it is valid: every manifest
//! matches the schema and module names are unique.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::LoadArgs;

/// Arguments for `poseidon validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the corpus is valid, 1 when it is not. Errors
/// that prevent validation from running at all (unloadable schemas) are
/// returned as `Err`.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let validator = args.load.validator()?;

    match args.load.load(&validator) {
        Ok(registry) => {
            writeln!(
                out,
                "OK: {} module(s) under {} are valid",
                registry.len(),
                args.load.root.display()
            )?;
            Ok(0)
        }
        Err(err) => {
            let kind = if err.is_validation() {
                "schema"
            } else if err.is_business_rule() {
                "rule"
            } else {
                "discovery"
            };
            writeln!(out, "FAIL ({kind}): {err}")?;
            Ok(1)
        }
    }
}
