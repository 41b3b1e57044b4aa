//! Shared test utilities for goext tests
//!
//! A runner that records command lines instead of spawning them, and
//! fixtures for fake tool directories.

use crate::env_vars::EnvMap;
use crate::extensions::process::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Records every command line and never launches anything.
///
/// `go install <module>@latest` can be made to drop an executable named
/// after the module's last path segment into a directory, mimicking Go.
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<Vec<String>>>,
    last_env: RefCell<Option<EnvMap>>,
    failing: Vec<(String, i32)>,
    install_dir: Option<PathBuf>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose first argument is `subcommand`
    pub(crate) fn failing(mut self, subcommand: &str, code: i32) -> Self {
        self.failing.push((subcommand.to_string(), code));
        self
    }

    pub(crate) fn installing_into(mut self, dir: &Path) -> Self {
        self.install_dir = Some(dir.to_path_buf());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub(crate) fn last_env(&self) -> Option<EnvMap> {
        self.last_env.borrow().clone()
    }

    /// Number of `go install` invocations seen
    pub(crate) fn installs(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|argv| argv.get(1).is_some_and(|arg| arg == "install"))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, argv: &[String], env: &EnvMap) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(argv.to_vec());
        *self.last_env.borrow_mut() = Some(env.clone());

        let subcommand = argv.get(1).map(String::as_str);
        if let Some((name, code)) = self
            .failing
            .iter()
            .find(|(name, _)| Some(name.as_str()) == subcommand)
        {
            return Ok(CommandOutput {
                code: Some(*code),
                success: false,
                stdout: String::new(),
                stderr: format!("{name} failed"),
            });
        }

        if subcommand == Some("install")
            && let Some(dir) = &self.install_dir
            && let Some(spec) = argv.get(2)
            && let Some(tool) = spec.split('@').next().and_then(|m| m.rsplit('/').next())
        {
            write_executable(dir, tool);
        }

        Ok(CommandOutput {
            code: Some(0),
            success: true,
            ..CommandOutput::default()
        })
    }
}

/// Write an executable shell script that exits 0
pub(crate) fn write_executable(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").expect("Failed to write fake tool");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }
    path
}

#[cfg(unix)]
pub(crate) mod fixtures {
    use super::write_executable;
    use crate::env_vars::EnvMap;
    use crate::extensions::toolchain::{BuildFlags, ToolchainConfig};
    use std::path::Path;
    use tempfile::TempDir;

    /// Create a temporary directory holding fake executables
    pub(crate) fn fake_bin_dir(tools: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for tool in tools {
            write_executable(dir.path(), tool);
        }
        dir
    }

    /// Toolchain whose `PATH`, `GOBIN` and `HOME` all point at `bin`
    pub(crate) fn fake_toolchain(bin: &Path, flags: BuildFlags) -> ToolchainConfig {
        let bin_str = bin.display().to_string();
        let env: EnvMap = [
            ("PATH".to_string(), bin_str.clone()),
            ("GOBIN".to_string(), bin_str.clone()),
            ("HOME".to_string(), bin_str),
        ]
        .into_iter()
        .collect();
        ToolchainConfig::new("go", "/usr/bin/python3", flags, env)
    }
}

#[cfg(unix)]
pub(crate) use fixtures::{fake_bin_dir, fake_toolchain};
