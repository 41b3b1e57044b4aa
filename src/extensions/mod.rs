//! Extension building
//!
//! Builds Python extension modules. Go extensions are bound and compiled
//! with gopy (installed on demand with `go install`); other native
//! extensions run a command the project declares.
//!
//! Pieces, bottom-up:
//! - [`toolchain`]: Go command, target interpreter, flags, environment
//! - [`process`]: the command-runner seam and dry-run/verbose spawning
//! - [`tools`]: locating and installing gopy and goimports
//! - [`gopy`]: `gopy gen` / `gopy build` for one extension
//! - [`freshness`]: up-to-date checks
//! - [`builder`]: the coordinator that walks all declared extensions

pub mod builder;
pub mod error;
pub mod freshness;
pub mod go_extension;
pub mod gopy;
pub mod native_extension;
pub mod process;
pub mod toolchain;
pub mod tools;
pub mod types;

pub use builder::BuildCommand;
pub use error::{BuildError, SpawnError};
pub use go_extension::GoExtension;
pub use gopy::{GoExtensionBuilder, GopyCommand};
pub use native_extension::{CommandBuildStep, NativeBuildStep, NativeExtension};
pub use process::{CommandOutput, CommandRunner, SystemRunner};
pub use toolchain::{BuildFlags, DEFAULT_GO_COMMAND, ToolchainConfig};
pub use tools::{ToolInstaller, ToolsReady};
pub use types::{BuildReport, BuildState, BuildSummary, ExtensionKind};
