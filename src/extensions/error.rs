//! Build errors
//!
//! [`SpawnError`] describes one failed subprocess. [`BuildError`] wraps it
//! with the phase that failed and the extension it failed for.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Minimum Go toolchain the binding generator supports
pub const MINIMUM_GO: &str = "Go 1.16 or above";

/// A command that could not be started or exited unsuccessfully
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The program could not be launched at all
    #[error("failed to run `{command}`")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The program ran and exited non-zero (or was killed by a signal)
    #[error("`{command}` failed with {}", exit_detail(*.code, .stderr))]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_detail(code: Option<i32>, stderr: &str) -> String {
    let status = code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |code| format!("exit code {code}"),
    );
    let stderr = stderr.trim();
    if stderr.is_empty() {
        status
    } else {
        format!("{status}:\n{stderr}")
    }
}

/// Errors raised while installing tools or building extensions
#[derive(Debug, Error)]
pub enum BuildError {
    /// The extension declaration itself is unusable
    #[error("invalid extension '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    /// A required executable could not be found
    #[error("`{tool}` not found: {requirement}")]
    MissingTool { tool: String, requirement: String },

    /// `go install` for an auxiliary tool failed
    #[error("failed to install {tool}")]
    ToolInstall {
        tool: String,
        #[source]
        source: SpawnError,
    },

    /// `gopy gen` failed
    #[error("generating bindings for '{extension}' failed")]
    Generation {
        extension: String,
        #[source]
        source: SpawnError,
    },

    /// `gopy build` failed
    #[error("compiling '{extension}' failed")]
    Compile {
        extension: String,
        #[source]
        source: SpawnError,
    },

    /// A native extension's own build command failed
    #[error("building native extension '{extension}' failed")]
    Native {
        extension: String,
        #[source]
        source: SpawnError,
    },

    /// Filesystem work around a build (output directories)
    #[error("failed {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Name of the extension this error is about, when there is one
    pub fn extension(&self) -> Option<&str> {
        match self {
            Self::InvalidDescriptor { name, .. } => Some(name.as_str()),
            Self::Generation { extension, .. }
            | Self::Compile { extension, .. }
            | Self::Native { extension, .. } => Some(extension.as_str()),
            Self::MissingTool { .. } | Self::ToolInstall { .. } | Self::Io { .. } => None,
        }
    }
}
