//! goext internal library code
//!
//! Builds Python extension modules from Go packages with gopy, alongside
//! ordinary native extensions, following the `build_ext` conventions of
//! Python packaging.

pub mod config;
pub mod debug;
pub mod env_vars;
pub mod extensions;
pub mod paths;
pub mod python;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export common types for convenience
pub use config::Config;
pub use debug::{init_debug, is_debug_enabled};
pub use extensions::{
    BuildCommand, BuildError, BuildFlags, BuildReport, BuildState, BuildSummary,
    CommandBuildStep, CommandRunner, ExtensionKind, GoExtension, GoExtensionBuilder,
    NativeBuildStep, NativeExtension, SpawnError, SystemRunner, ToolInstaller,
    ToolchainConfig,
};
pub use paths::{BuildLayout, HostPaths};
