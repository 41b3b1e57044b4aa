//! Running external commands
//!
//! Every command goes through a [`CommandRunner`], so builds can be driven
//! against a recording runner in tests. [`spawn`] layers the verbose and
//! dry-run behavior on top of whichever runner is in use.

use super::error::SpawnError;
use super::toolchain::ToolchainConfig;
use crate::env_vars::EnvMap;
use std::fmt;
use std::io;
use std::process::Command;

/// Captured result of one finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a command line to completion
pub trait CommandRunner: fmt::Debug {
    /// Run `argv` with exactly `env` as its environment.
    ///
    /// `argv[0]` is the program. An `Err` means the program could not be
    /// started; a non-zero exit is reported through [`CommandOutput`].
    fn run(&self, argv: &[String], env: &EnvMap) -> io::Result<CommandOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], env: &EnvMap) -> io::Result<CommandOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;

        let output = Command::new(program)
            .args(args)
            .env_clear()
            .envs(env)
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Render a command line for display, quoting arguments with spaces.
pub fn render(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("'{arg}'")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run one command under the toolchain's flags and environment.
///
/// With `verbose` or `dry_run` the command line is echoed first. With
/// `dry_run` nothing is executed. With `verbose` the command's own output
/// is replayed after it finishes.
///
/// # Errors
/// `SpawnError::Launch` if the program cannot be started,
/// `SpawnError::Exit` if it exits unsuccessfully.
pub fn spawn<R: CommandRunner + ?Sized>(
    runner: &R,
    toolchain: &ToolchainConfig,
    argv: &[String],
) -> Result<(), SpawnError> {
    let flags = toolchain.flags();
    let command = render(argv);

    if flags.verbose || flags.dry_run {
        println!("{command}");
    }
    if flags.dry_run {
        return Ok(());
    }

    crate::debug!("running: {command}");
    let output = runner
        .run(argv, toolchain.env())
        .map_err(|source| SpawnError::Launch {
            command: command.clone(),
            source,
        })?;

    if flags.verbose {
        print!("{}", output.stdout);
        eprint!("{}", output.stderr);
    }

    if output.success {
        Ok(())
    } else {
        crate::debug!("{command} exited with {:?}", output.code);
        Err(SpawnError::Exit {
            command,
            code: output.code,
            stderr: output.stderr,
        })
    }
}
