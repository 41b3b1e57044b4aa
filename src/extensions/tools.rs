//! Build tool provisioning
//!
//! gopy drives the binding generation and shells out to goimports, so both
//! must be on the search path before the first build. Missing ones are
//! fetched with `go install <module>@latest`. The Go toolchain itself is
//! never installed; without it nothing can proceed.

use super::error::{BuildError, MINIMUM_GO};
use super::process::{self, CommandRunner};
use super::toolchain::ToolchainConfig;
use std::path::{Path, PathBuf};

/// A Go-distributed executable the build depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryTool {
    /// Executable name once installed
    pub name: &'static str,
    /// Module path passed to `go install`
    pub module: &'static str,
}

impl AuxiliaryTool {
    /// Argument for `go install`, always the latest release
    pub fn install_spec(&self) -> String {
        format!("{}@latest", self.module)
    }
}

/// The binding generator
pub const GOPY: AuxiliaryTool = AuxiliaryTool {
    name: "gopy",
    module: "github.com/go-python/gopy",
};

/// Import fixer gopy runs over generated Go code
pub const GOIMPORTS: AuxiliaryTool = AuxiliaryTool {
    name: "goimports",
    module: "golang.org/x/tools/cmd/goimports",
};

/// Everything installed on demand, in install order
pub const AUXILIARY_TOOLS: [AuxiliaryTool; 2] = [GOPY, GOIMPORTS];

/// Resolved tools after a successful [`ToolInstaller::ensure_installed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsReady {
    /// Resolved Go executable
    pub go: PathBuf,
    /// gopy, resolved when possible, otherwise its bare name
    pub generator: PathBuf,
    /// Tools this call had to install
    pub installed: Vec<&'static str>,
    /// Tools a dry run would have installed
    pub pending: Vec<&'static str>,
}

/// Locates and installs the build tools, once per installer
#[derive(Debug, Default)]
pub struct ToolInstaller {
    ready: Option<ToolsReady>,
}

impl ToolInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether tools were already ensured by this installer
    pub fn is_ready(&self) -> bool {
        self.ready.as_ref().is_some_and(|ready| ready.pending.is_empty())
    }

    /// Find `name` on the toolchain's search path
    pub fn locate(toolchain: &ToolchainConfig, name: &str) -> Option<PathBuf> {
        let found = which::which_in(name, Some(toolchain.tool_search_path()), Path::new(".")).ok();
        crate::debug!("probe {name}: {found:?}");
        found
    }

    pub fn is_available(toolchain: &ToolchainConfig, name: &str) -> bool {
        Self::locate(toolchain, name).is_some()
    }

    /// Make sure Go, gopy and goimports are usable.
    ///
    /// The first successful call probes and installs; later calls return the
    /// cached result without touching the runner. A failed call caches
    /// nothing, and neither does a dry run that left tools missing, so the
    /// next call tries again.
    ///
    /// # Errors
    /// * `BuildError::MissingTool` if the Go command is not found (before any install)
    /// * `BuildError::ToolInstall` if `go install` fails
    pub fn ensure_installed<R: CommandRunner + ?Sized>(
        &mut self,
        toolchain: &ToolchainConfig,
        runner: &R,
    ) -> Result<&ToolsReady, BuildError> {
        let ready = match self.ready.take() {
            Some(ready) if ready.pending.is_empty() => ready,
            _ => Self::probe_and_install(toolchain, runner)?,
        };
        Ok(self.ready.insert(ready))
    }

    fn probe_and_install<R: CommandRunner + ?Sized>(
        toolchain: &ToolchainConfig,
        runner: &R,
    ) -> Result<ToolsReady, BuildError> {
        let go = Self::locate(toolchain, toolchain.go_command()).ok_or_else(|| {
            BuildError::MissingTool {
                tool: toolchain.go_command().to_string(),
                requirement: format!("{MINIMUM_GO} is required to build this extension"),
            }
        })?;

        let dry_run = toolchain.flags().dry_run;
        let mut installed = Vec::new();
        let mut pending = Vec::new();
        for tool in AUXILIARY_TOOLS {
            if Self::is_available(toolchain, tool.name) {
                continue;
            }

            println!("Installing {} ({})...", tool.name, tool.install_spec());
            let argv = vec![
                toolchain.go_command().to_string(),
                "install".to_string(),
                tool.install_spec(),
            ];
            process::spawn(runner, toolchain, &argv).map_err(|source| {
                BuildError::ToolInstall {
                    tool: tool.name.to_string(),
                    source,
                }
            })?;
            if dry_run {
                pending.push(tool.name);
            } else {
                installed.push(tool.name);
            }
        }

        let generator =
            Self::locate(toolchain, GOPY.name).unwrap_or_else(|| PathBuf::from(GOPY.name));

        Ok(ToolsReady {
            go,
            generator,
            installed,
            pending,
        })
    }
}
