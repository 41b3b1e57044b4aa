//! Extension Build Orchestration
//!
//! Coordinates building every declared extension, the way `build_ext` does
//! for a Python package. Go extensions go through gopy; native ones are
//! handed to the configured [`NativeBuildStep`] untouched.
//!
//! For one Go extension:
//! 1. Skip it when the artifact is newer than every input (unless forced)
//! 2. For in-place builds, generate bindings into the package's source directory
//! 3. Build and compile into the directory of the final artifact

use super::error::BuildError;
use super::freshness;
use super::go_extension::GoExtension;
use super::gopy::GoExtensionBuilder;
use super::native_extension::NativeBuildStep;
use super::process::{CommandRunner, SystemRunner};
use super::types::{BuildReport, BuildState, BuildSummary, ExtensionKind};
use crate::paths::HostPaths;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Build coordinator
///
/// Owns the Go builder and the host's path and native-build hooks, and
/// keeps a report for every extension it was asked to build.
#[derive(Debug)]
pub struct BuildCommand<R: CommandRunner = SystemRunner> {
    go: GoExtensionBuilder<R>,
    paths: Box<dyn HostPaths>,
    native: Box<dyn NativeBuildStep>,
    project_root: PathBuf,
    reports: Vec<BuildReport>,
}

impl<R: CommandRunner> BuildCommand<R> {
    /// Create a build coordinator.
    ///
    /// # Arguments
    /// * `go` - Builder used for Go extensions
    /// * `paths` - Artifact and package-directory layout
    /// * `native` - Step that builds non-Go extensions
    pub fn new(
        go: GoExtensionBuilder<R>,
        paths: Box<dyn HostPaths>,
        native: Box<dyn NativeBuildStep>,
    ) -> Self {
        Self {
            go,
            paths,
            native,
            project_root: PathBuf::from("."),
            reports: Vec::new(),
        }
    }

    /// Directory holding `go.mod` (default `.`)
    #[must_use]
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    pub const fn go_builder(&self) -> &GoExtensionBuilder<R> {
        &self.go
    }

    /// Reports for every extension attempted so far, in order
    pub fn reports(&self) -> &[BuildReport] {
        &self.reports
    }

    /// Totals over [`reports`](Self::reports)
    pub fn summarize(&self) -> BuildSummary {
        BuildSummary::of(&self.reports)
    }

    /// Build extensions in order, stopping at the first failure.
    ///
    /// Extensions after the failing one are not attempted.
    pub fn run(&mut self, extensions: &[ExtensionKind]) -> Result<(), BuildError> {
        for ext in extensions {
            self.build_extension(ext)?;
        }
        Ok(())
    }

    /// Build one extension and record its report.
    ///
    /// # Returns
    /// The final state (`Skipped` or `Done`). On error a `Failed` report is
    /// recorded and the error is returned unchanged.
    pub fn build_extension(&mut self, ext: &ExtensionKind) -> Result<BuildState, BuildError> {
        let start = Instant::now();
        crate::debug!("{} '{}': {}", ext.description(), ext.name(), BuildState::Pending);

        let result = match ext {
            ExtensionKind::Go(go) => self.build_go(go),
            ExtensionKind::Native(native) => self.native.build_native(native, &*self.paths),
        };

        let state = result.as_ref().map_or(BuildState::Failed, |state| *state);
        crate::debug!("{} '{}': {}", ext.description(), ext.name(), state);
        self.reports.push(BuildReport {
            name: ext.name().to_string(),
            state,
            duration: start.elapsed(),
        });
        result
    }

    /// Whether the Go extension's artifact at `target` is up to date
    pub fn should_skip(&self, ext: &GoExtension, target: &Path) -> bool {
        let mut inputs = ext.declared_inputs();
        inputs.extend(freshness::go_package_files(ext.packages(), &self.project_root));
        freshness::should_skip(&inputs, target, self.go.toolchain().flags().force)
    }

    fn build_go(&mut self, ext: &GoExtension) -> Result<BuildState, BuildError> {
        let target = self.paths.ext_fullpath(&ext.module_name());
        if self.should_skip(ext, &target) {
            crate::debug!("skipping '{}' extension (up-to-date)", ext.name());
            return Ok(BuildState::Skipped);
        }

        println!("building '{}' extension", ext.name());
        crate::debug!("Go extension '{}': {}", ext.name(), BuildState::Building);

        if self.go.toolchain().flags().inplace {
            let package_dir = self.paths.package_dir(ext.package());
            self.prepare_output_dir(&package_dir)?;
            self.go.generate_bindings(ext, &package_dir)?;
        }

        let output_dir = target
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.prepare_output_dir(&output_dir)?;
        self.go.build_and_compile(ext, &output_dir)?;

        Ok(BuildState::Done)
    }

    fn prepare_output_dir(&self, dir: &Path) -> Result<(), BuildError> {
        if self.go.toolchain().flags().dry_run {
            crate::debug!("dry run: not creating {}", dir.display());
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| BuildError::Io {
            action: "creating",
            path: dir.to_path_buf(),
            source,
        })
    }
}
