//! Environment variables read by the build.
//!
//! Accessors take an explicit [`EnvMap`] instead of reading the process
//! environment, so one build works from a single snapshot and tests can
//! hand in whatever environment they like.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// Environment handed to every spawned command
pub type EnvMap = BTreeMap<String, String>;

/// Dynamic-library search path variable for this platform
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";

/// Dynamic-library search path variable for this platform
#[cfg(not(target_os = "macos"))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Snapshot the current process environment (non-UTF-8 entries are dropped).
pub fn snapshot() -> EnvMap {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

fn non_empty<'a>(env: &'a EnvMap, key: &str) -> Option<&'a str> {
    env.get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Get the executable search path (`PATH`).
pub fn path(env: &EnvMap) -> Option<&str> {
    non_empty(env, "PATH")
}

/// Get `GOBIN`, where `go install` puts binaries when set.
pub fn gobin(env: &EnvMap) -> Option<PathBuf> {
    non_empty(env, "GOBIN").map(PathBuf::from)
}

/// Get the first `GOPATH` entry.
pub fn gopath(env: &EnvMap) -> Option<PathBuf> {
    non_empty(env, "GOPATH").and_then(|value| env::split_paths(value).next())
}

/// Get the home directory (`HOME`, falling back to the platform lookup).
pub fn home(env: &EnvMap) -> Option<PathBuf> {
    non_empty(env, "HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Get the Python interpreter override (`PYTHON`).
pub fn python(env: &EnvMap) -> Option<&str> {
    non_empty(env, "PYTHON")
}

/// Directory `go install` writes binaries to.
/// Priority: `GOBIN` -> `$GOPATH/bin` -> `~/go/bin`.
pub fn go_bin_dir(env: &EnvMap) -> Option<PathBuf> {
    gobin(env)
        .or_else(|| gopath(env).map(|dir| dir.join("bin")))
        .or_else(|| home(env).map(|dir| dir.join("go").join("bin")))
}

/// Append `dir` to a colon-separated library path, stripping separators at the edges only.
pub fn augment_library_path(current: &str, dir: &str) -> String {
    format!("{current}:{dir}").trim_matches(':').to_string()
}
