//! Per-invocation toolchain settings
//!
//! Built once from the CLI flags and the process environment, then shared by
//! every step of a build. The environment copy gets the current directory
//! appended to the dynamic-library search path so freshly built modules can
//! load their shared Go runtime, and the `go install` bin directory appended
//! to `PATH` so gopy finds the goimports installed there.

use crate::env_vars::{self, EnvMap, LIBRARY_PATH_VAR};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Go executable used when nothing else is configured
pub const DEFAULT_GO_COMMAND: &str = "go";

const CURRENT_DIR: &str = ".";

const PATH_VAR: &str = "PATH";

/// Flags that change how commands run, not what they build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildFlags {
    /// Echo every command and stream its output
    pub verbose: bool,
    /// Print commands without running them or touching the filesystem
    pub dry_run: bool,
    /// Rebuild even when outputs look up to date
    pub force: bool,
    /// Also generate bindings into the source tree
    pub inplace: bool,
}

/// Go command, target interpreter, flags and environment for one build
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    go_command: String,
    interpreter: PathBuf,
    flags: BuildFlags,
    env: EnvMap,
}

impl ToolchainConfig {
    /// Create a toolchain config from an explicit environment.
    ///
    /// The library path variable in `env` gets `.` appended, and `PATH`
    /// gets the `go install` bin directory unless it already lists it.
    pub fn new(
        go_command: impl Into<String>,
        interpreter: impl Into<PathBuf>,
        flags: BuildFlags,
        mut env: EnvMap,
    ) -> Self {
        let current = env.get(LIBRARY_PATH_VAR).map_or("", String::as_str);
        let augmented = env_vars::augment_library_path(current, CURRENT_DIR);
        env.insert(LIBRARY_PATH_VAR.to_string(), augmented);

        let dirs = search_dirs(&env);
        if !dirs.is_empty()
            && let Ok(joined) = env::join_paths(&dirs)
            && let Ok(path) = joined.into_string()
        {
            env.insert(PATH_VAR.to_string(), path);
        }

        Self {
            go_command: go_command.into(),
            interpreter: interpreter.into(),
            flags,
            env,
        }
    }

    /// Create a toolchain config from the current process environment.
    pub fn from_process_env(
        go_command: impl Into<String>,
        interpreter: impl Into<PathBuf>,
        flags: BuildFlags,
    ) -> Self {
        Self::new(go_command, interpreter, flags, env_vars::snapshot())
    }

    pub fn go_command(&self) -> &str {
        &self.go_command
    }

    /// Python interpreter the bindings target (gopy's `-vm=`)
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub const fn flags(&self) -> BuildFlags {
        self.flags
    }

    /// Environment every spawned command receives
    pub fn env(&self) -> &EnvMap {
        &self.env
    }

    /// Where executables are looked up: `PATH` plus the `go install` bin directory
    pub fn tool_search_path(&self) -> OsString {
        env::join_paths(search_dirs(&self.env)).unwrap_or_else(|_| {
            env_vars::path(&self.env)
                .map(OsString::from)
                .unwrap_or_default()
        })
    }
}

/// `PATH` entries followed by the `go install` bin directory, listed once
fn search_dirs(env: &EnvMap) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = env_vars::path(env)
        .map(|path| env::split_paths(path).collect())
        .unwrap_or_default();

    if let Some(bin) = env_vars::go_bin_dir(env)
        && !dirs.contains(&bin)
    {
        dirs.push(bin);
    }
    dirs
}
