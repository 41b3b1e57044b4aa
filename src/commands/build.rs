//! Build command
//!
//! Build every extension declared in the project configuration

use super::Session;
use crate::ToolchainArgs;
use anyhow::{Context, Result};
use goext::extensions::{BuildCommand, BuildFlags, CommandBuildStep, GoExtensionBuilder};
use goext::paths::{BuildLayout, DEFAULT_BUILD_LIB};
use goext::python;
use std::path::PathBuf;

/// Flags specific to `goext build`
#[derive(Debug, Clone)]
pub(crate) struct BuildOptions {
    pub(crate) inplace: bool,
    pub(crate) force: bool,
    pub(crate) build_lib: Option<PathBuf>,
}

/// Build all configured extensions in declaration order
pub(crate) fn run(args: &ToolchainArgs, options: &BuildOptions) -> Result<()> {
    let flags = BuildFlags {
        verbose: args.verbose,
        dry_run: args.dry_run,
        force: options.force,
        inplace: options.inplace,
    };
    let Session { config, toolchain } = Session::resolve(args, flags, true)?;

    let extensions = config
        .extensions()
        .context("Invalid extension in configuration")?;
    if extensions.is_empty() {
        println!("No extensions configured");
        return Ok(());
    }

    let build_lib = options
        .build_lib
        .clone()
        .or_else(|| config.build_lib.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_LIB));
    let ext_suffix = config
        .ext_suffix
        .clone()
        .or_else(|| python::ext_suffix(toolchain.interpreter()))
        .unwrap_or_else(|| python::default_ext_suffix().to_string());
    goext::debug!(
        "build_lib: {}, ext_suffix: {ext_suffix}",
        build_lib.display()
    );

    let layout = BuildLayout::new(build_lib, ext_suffix).with_package_dirs(config.package_dirs());
    let native = CommandBuildStep::new(toolchain.clone());
    let mut command = BuildCommand::new(
        GoExtensionBuilder::new(toolchain),
        Box::new(layout),
        Box::new(native),
    );

    let result = command.run(&extensions);
    println!("{}", command.summarize());
    result.context("Build failed")
}
