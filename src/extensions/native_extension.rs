//! Native (non-Go) extensions
//!
//! These are built by whatever command the project declares for them. The
//! build coordinator only routes them to a [`NativeBuildStep`]; the default
//! step runs the declared command with two placeholders filled in:
//! `{name}` (the module name) and `{output_dir}` (where the artifact goes).

use super::error::BuildError;
use super::freshness;
use super::process::{self, CommandRunner, SystemRunner};
use super::toolchain::ToolchainConfig;
use super::types::BuildState;
use crate::paths::HostPaths;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// An extension built by its own command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeExtension {
    name: String,
    command: Vec<String>,
    sources: Vec<PathBuf>,
    depends: Vec<PathBuf>,
}

impl NativeExtension {
    /// Declare a native extension.
    ///
    /// # Errors
    /// `BuildError::InvalidDescriptor` when the name or the command is empty.
    pub fn new<I, S>(name: impl Into<String>, command: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let command: Vec<String> = command.into_iter().map(Into::into).collect();

        if name.trim().is_empty() {
            return Err(BuildError::InvalidDescriptor {
                name,
                reason: "module name must not be empty".to_string(),
            });
        }
        if command.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(BuildError::InvalidDescriptor {
                name,
                reason: "a build command is required".to_string(),
            });
        }

        Ok(Self {
            name,
            command,
            sources: Vec::new(),
            depends: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_depends(mut self, depends: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build command as declared, placeholders unexpanded
    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn depends(&self) -> &[PathBuf] {
        &self.depends
    }

    /// Build command with `{name}` and `{output_dir}` filled in
    pub fn expanded_command(&self, output_dir: &Path) -> Vec<String> {
        let output_dir = output_dir.display().to_string();
        self.command
            .iter()
            .map(|arg| {
                arg.replace("{name}", &self.name)
                    .replace("{output_dir}", &output_dir)
            })
            .collect()
    }
}

/// Builds native extensions on behalf of the coordinator
pub trait NativeBuildStep: fmt::Debug {
    /// Build `ext`, returning `Skipped` or `Done`.
    fn build_native(
        &mut self,
        ext: &NativeExtension,
        paths: &dyn HostPaths,
    ) -> Result<BuildState, BuildError>;
}

/// Runs each native extension's declared command
#[derive(Debug)]
pub struct CommandBuildStep<R: CommandRunner = SystemRunner> {
    toolchain: ToolchainConfig,
    runner: R,
}

impl CommandBuildStep {
    pub fn new(toolchain: ToolchainConfig) -> Self {
        Self::with_runner(toolchain, SystemRunner)
    }
}

impl<R: CommandRunner> CommandBuildStep<R> {
    pub fn with_runner(toolchain: ToolchainConfig, runner: R) -> Self {
        Self { toolchain, runner }
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> NativeBuildStep for CommandBuildStep<R> {
    fn build_native(
        &mut self,
        ext: &NativeExtension,
        paths: &dyn HostPaths,
    ) -> Result<BuildState, BuildError> {
        let flags = self.toolchain.flags();
        let target = paths.ext_fullpath(ext.name());
        let inputs: Vec<PathBuf> = ext.sources().iter().chain(ext.depends()).cloned().collect();

        if freshness::should_skip(&inputs, &target, flags.force) {
            crate::debug!("skipping '{}' extension (up-to-date)", ext.name());
            return Ok(BuildState::Skipped);
        }

        println!("building '{}' extension", ext.name());
        let output_dir = target
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        if !flags.dry_run {
            fs::create_dir_all(&output_dir).map_err(|source| BuildError::Io {
                action: "creating",
                path: output_dir.clone(),
                source,
            })?;
        }

        let argv = ext.expanded_command(&output_dir);
        process::spawn(&self.runner, &self.toolchain, &argv).map_err(|source| {
            BuildError::Native {
                extension: ext.name().to_string(),
                source,
            }
        })?;

        Ok(BuildState::Done)
    }
}
