//! Command implementations
//!
//! Each command resolves a [`Session`] (configuration plus toolchain) from
//! its flags and then drives the library.

use crate::ToolchainArgs;
use anyhow::{Context, Result};
use goext::extensions::{BuildFlags, DEFAULT_GO_COMMAND, ToolchainConfig};
use goext::{Config, env_vars, python};
use std::path::PathBuf;

pub(crate) mod build;
pub(crate) mod completion;
pub(crate) mod generate;
pub(crate) mod tools;

/// Interpreter named in `-vm=` when tools are only being installed or checked
const FALLBACK_INTERPRETER: &str = "python3";

/// Configuration and toolchain for one command invocation
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) config: Config,
    pub(crate) toolchain: ToolchainConfig,
}

impl Session {
    /// Load configuration and resolve the toolchain.
    ///
    /// Flags override the configuration file. When `needs_interpreter` is
    /// false a missing Python falls back to `python3` instead of failing.
    pub(crate) fn resolve(
        args: &ToolchainArgs,
        flags: BuildFlags,
        needs_interpreter: bool,
    ) -> Result<Self> {
        let config = Config::load_with_options(args.config.as_deref())
            .context("Failed to load goext configuration")?;

        let go_command = args
            .go_command
            .clone()
            .or_else(|| config.go_command.clone())
            .unwrap_or_else(|| DEFAULT_GO_COMMAND.to_string());

        let env = env_vars::snapshot();
        // Interpreter lookup uses the same search path the tools do
        let probe = ToolchainConfig::new(
            go_command.clone(),
            FALLBACK_INTERPRETER,
            flags,
            env.clone(),
        );
        let explicit = args.python.as_deref().or(config.python.as_deref());
        let interpreter =
            match python::find_interpreter(explicit, &env, &probe.tool_search_path()) {
                Ok(interpreter) => interpreter,
                Err(e) if needs_interpreter => {
                    return Err(e).context("Cannot build without a Python interpreter");
                }
                Err(e) => {
                    goext::debug!("{e}; using {FALLBACK_INTERPRETER}");
                    PathBuf::from(FALLBACK_INTERPRETER)
                }
            };
        goext::debug!("interpreter: {}", interpreter.display());

        Ok(Self {
            config,
            toolchain: ToolchainConfig::new(go_command, interpreter, flags, env),
        })
    }
}
