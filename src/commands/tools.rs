//! Tool commands
//!
//! Install or check the Go-distributed tools the build needs

use super::Session;
use crate::ToolchainArgs;
use anyhow::{Result, bail};
use goext::extensions::tools::AUXILIARY_TOOLS;
use goext::extensions::{BuildFlags, SystemRunner, ToolInstaller};

fn flags(args: &ToolchainArgs) -> BuildFlags {
    BuildFlags {
        verbose: args.verbose,
        dry_run: args.dry_run,
        ..BuildFlags::default()
    }
}

/// Install gopy and goimports if they are missing
pub(crate) fn install(args: &ToolchainArgs) -> Result<()> {
    let Session { toolchain, .. } = Session::resolve(args, flags(args), false)?;

    let mut installer = ToolInstaller::new();
    let ready = installer.ensure_installed(&toolchain, &SystemRunner)?;

    if !ready.pending.is_empty() {
        println!("Would install: {}", ready.pending.join(", "));
    } else if ready.installed.is_empty() {
        println!("All tools already installed");
    } else {
        println!("Installed: {}", ready.installed.join(", "));
    }
    println!("go:   {}", ready.go.display());
    println!("gopy: {}", ready.generator.display());
    Ok(())
}

/// Report where each tool was found
pub(crate) fn check(args: &ToolchainArgs) -> Result<()> {
    let Session { toolchain, .. } = Session::resolve(args, flags(args), false)?;

    let names = std::iter::once(toolchain.go_command())
        .chain(AUXILIARY_TOOLS.iter().map(|tool| tool.name));

    let mut missing = Vec::new();
    for name in names {
        match ToolInstaller::locate(&toolchain, name) {
            Some(path) => println!("  {name}: {}", path.display()),
            None => {
                println!("  {name}: not found");
                missing.push(name);
            }
        }
    }

    if !missing.is_empty() {
        bail!(
            "Missing tools: {} (run `goext install-tools`)",
            missing.join(", ")
        );
    }
    println!("All tools found");
    Ok(())
}
