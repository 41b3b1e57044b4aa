//! Python interpreter discovery
//!
//! Finds the interpreter the extensions are built for and asks it for the
//! module filename suffix it imports.

use crate::env_vars::{self, EnvMap};
use crate::extensions::BuildError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Interpreter names tried when nothing is configured
const CANDIDATES: [&str; 2] = ["python3", "python"];

const EXT_SUFFIX_SCRIPT: &str = "import sysconfig; print(sysconfig.get_config_var('EXT_SUFFIX') or '')";

/// Find the Python interpreter.
/// Priority: `explicit` (flag or config) -> `PYTHON` env var -> `python3` -> `python`.
///
/// An explicit or `PYTHON` choice that cannot be found is an error rather
/// than a reason to fall back.
pub fn find_interpreter(
    explicit: Option<&str>,
    env: &EnvMap,
    search_path: &OsStr,
) -> Result<PathBuf, BuildError> {
    let lookup = |name: &str| which::which_in(name, Some(search_path), Path::new(".")).ok();

    if let Some(name) = explicit.or_else(|| env_vars::python(env)) {
        return lookup(name).ok_or_else(|| BuildError::MissingTool {
            tool: name.to_string(),
            requirement: "the configured Python interpreter must exist".to_string(),
        });
    }

    CANDIDATES
        .into_iter()
        .find_map(lookup)
        .ok_or_else(|| BuildError::MissingTool {
            tool: "python3".to_string(),
            requirement: "a Python interpreter is required; set PYTHON or --python".to_string(),
        })
}

/// Module suffix reported by `interpreter` (`sysconfig` `EXT_SUFFIX`)
pub fn ext_suffix(interpreter: &Path) -> Option<String> {
    let output = Command::new(interpreter)
        .args(["-c", EXT_SUFFIX_SCRIPT])
        .output()
        .ok()?;

    if !output.status.success() {
        crate::debug!(
            "{} could not report EXT_SUFFIX: {}",
            interpreter.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let suffix = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!suffix.is_empty()).then_some(suffix)
}

/// Suffix used when the interpreter cannot be asked
pub const fn default_ext_suffix() -> &'static str {
    if cfg!(windows) { ".pyd" } else { ".so" }
}
