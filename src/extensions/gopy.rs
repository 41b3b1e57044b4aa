//! gopy-driven Go extension building
//!
//! Two gopy subcommands are used:
//! ```bash
//! gopy gen   -name=go -no-make -rename -vm=<python> -output=<dir> <packages...>
//! gopy build -name=go -no-make -rename -vm=<python> -output=<dir> <packages...>
//! ```
//! `gen` only writes Go/Python glue into the output directory; `build` also
//! compiles the extension module there.

use super::error::{BuildError, SpawnError};
use super::go_extension::GoExtension;
use super::process::{self, CommandRunner, SystemRunner};
use super::toolchain::ToolchainConfig;
use super::tools::{ToolInstaller, ToolsReady};
use std::path::Path;

/// gopy subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GopyCommand {
    /// Generate bindings only
    Gen,
    /// Generate and compile
    Build,
}

impl GopyCommand {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gen => "gen",
            Self::Build => "build",
        }
    }
}

/// Full gopy command line for one extension.
///
/// # Arguments
/// * `generator` - gopy executable
/// * `command` - `gen` or `build`
/// * `ext` - extension whose packages are bound, in declaration order
/// * `interpreter` - Python the module is built for
/// * `output` - directory gopy writes into
pub fn gopy_command_line(
    generator: &Path,
    command: GopyCommand,
    ext: &GoExtension,
    interpreter: &Path,
    output: &Path,
) -> Vec<String> {
    let mut argv = vec![
        generator.display().to_string(),
        command.as_str().to_string(),
        format!("-name={}", ext.compiled_name()),
        "-no-make".to_string(),
        "-rename".to_string(),
        format!("-vm={}", interpreter.display()),
        format!("-output={}", output.display()),
    ];
    argv.extend(ext.packages().iter().cloned());
    argv
}

/// Builds Go extensions with gopy
///
/// Owns the toolchain settings, the command runner and the tool installer,
/// so tools are ensured at most once per builder.
#[derive(Debug)]
pub struct GoExtensionBuilder<R: CommandRunner = SystemRunner> {
    toolchain: ToolchainConfig,
    runner: R,
    tools: ToolInstaller,
}

impl GoExtensionBuilder {
    /// Create a builder that spawns real processes
    pub fn new(toolchain: ToolchainConfig) -> Self {
        Self::with_runner(toolchain, SystemRunner)
    }
}

impl<R: CommandRunner> GoExtensionBuilder<R> {
    pub fn with_runner(toolchain: ToolchainConfig, runner: R) -> Self {
        Self {
            toolchain,
            runner,
            tools: ToolInstaller::new(),
        }
    }

    pub const fn toolchain(&self) -> &ToolchainConfig {
        &self.toolchain
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Make sure Go, gopy and goimports are available (memoized)
    pub fn ensure_tools(&mut self) -> Result<&ToolsReady, BuildError> {
        self.tools.ensure_installed(&self.toolchain, &self.runner)
    }

    /// Run `gopy gen` for `ext` into `output`.
    ///
    /// # Errors
    /// Tool errors from [`ensure_tools`](Self::ensure_tools), or
    /// `BuildError::Generation` when gopy fails.
    pub fn generate_bindings(&mut self, ext: &GoExtension, output: &Path) -> Result<(), BuildError> {
        let argv = self.command_line(GopyCommand::Gen, ext, output)?;
        self.spawn(&argv).map_err(|source| BuildError::Generation {
            extension: ext.name().to_string(),
            source,
        })
    }

    /// Run `gopy build` for `ext` into `output`.
    ///
    /// # Errors
    /// Tool errors from [`ensure_tools`](Self::ensure_tools), or
    /// `BuildError::Compile` when gopy fails.
    pub fn build_and_compile(&mut self, ext: &GoExtension, output: &Path) -> Result<(), BuildError> {
        let argv = self.command_line(GopyCommand::Build, ext, output)?;
        self.spawn(&argv).map_err(|source| BuildError::Compile {
            extension: ext.name().to_string(),
            source,
        })
    }

    /// Run any command line under this builder's toolchain
    pub fn spawn(&self, argv: &[String]) -> Result<(), SpawnError> {
        process::spawn(&self.runner, &self.toolchain, argv)
    }

    fn command_line(
        &mut self,
        command: GopyCommand,
        ext: &GoExtension,
        output: &Path,
    ) -> Result<Vec<String>, BuildError> {
        let generator = self.ensure_tools()?.generator.clone();
        Ok(gopy_command_line(
            &generator,
            command,
            ext,
            self.toolchain.interpreter(),
            output,
        ))
    }
}
