//! Generate command
//!
//! Generate gopy bindings for Go packages without compiling them

use super::Session;
use crate::ToolchainArgs;
use anyhow::{Context, Result};
use goext::extensions::{BuildFlags, GoExtension, GoExtensionBuilder};
use std::fs;
use std::path::Path;

/// Run `gopy gen` for an ad-hoc extension into `output`
pub(crate) fn run(
    args: &ToolchainArgs,
    name: &str,
    output: &Path,
    packages: &[String],
) -> Result<()> {
    let flags = BuildFlags {
        verbose: args.verbose,
        dry_run: args.dry_run,
        ..BuildFlags::default()
    };
    let Session { toolchain, .. } = Session::resolve(args, flags, true)?;
    let ext = GoExtension::new(name, packages.iter().cloned())?;

    if !flags.dry_run {
        fs::create_dir_all(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
    }

    GoExtensionBuilder::new(toolchain).generate_bindings(&ext, output)?;

    if !flags.dry_run {
        println!(
            "Generated bindings for '{}' in {}",
            ext.module_name(),
            output.display()
        );
    }
    Ok(())
}
