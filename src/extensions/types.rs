//! Extension type definitions
//!
//! A project can declare Go extensions, built with gopy, next to ordinary
//! native extensions that bring their own build command.

use super::go_extension::GoExtension;
use super::native_extension::NativeExtension;
use std::fmt;
use std::time::Duration;

/// Any extension the build coordinator can be asked to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionKind {
    /// Bound from Go packages with gopy
    Go(GoExtension),
    /// Built by its own command
    Native(NativeExtension),
}

impl ExtensionKind {
    /// Logical name of the extension
    pub fn name(&self) -> &str {
        match self {
            Self::Go(ext) => ext.name(),
            Self::Native(ext) => ext.name(),
        }
    }

    /// Get a human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Go(_) => "Go extension",
            Self::Native(_) => "native extension",
        }
    }
}

impl From<GoExtension> for ExtensionKind {
    fn from(ext: GoExtension) -> Self {
        Self::Go(ext)
    }
}

impl From<NativeExtension> for ExtensionKind {
    fn from(ext: NativeExtension) -> Self {
        Self::Native(ext)
    }
}

/// Lifecycle of one extension within a build
///
/// `Pending -> Building -> Done | Failed`, or `Pending -> Skipped` when the
/// artifact is already up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Pending,
    Skipped,
    Building,
    Done,
    Failed,
}

impl BuildState {
    /// Whether no further transition can happen
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Skipped | Self::Done | Self::Failed)
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Skipped => "up to date",
            Self::Building => "building",
            Self::Done => "built",
            Self::Failed => "failed",
        })
    }
}

/// Outcome of building one extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Extension name
    pub name: String,
    /// Final state
    pub state: BuildState,
    /// Time spent, including freshness checks
    pub duration: Duration,
}

/// Totals over a set of [`BuildReport`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub built: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl BuildSummary {
    /// Get summary statistics
    #[must_use]
    pub fn of(reports: &[BuildReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            match report.state {
                BuildState::Done => summary.built += 1,
                BuildState::Skipped => summary.skipped += 1,
                BuildState::Failed => summary.failed += 1,
                BuildState::Pending | BuildState::Building => {}
            }
            summary.duration += report.duration;
            summary
        })
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} built, {} up to date, {} failed in {:.2}s",
            self.built,
            self.skipped,
            self.failed,
            self.duration.as_secs_f64()
        )
    }
}
