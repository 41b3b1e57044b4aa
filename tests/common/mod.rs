//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution (via `get_goext_binary`)
//! - Fake project and toolchain fixtures (via `helpers`)

pub(crate) mod helpers;

// Re-export for convenient access
pub(crate) use helpers::FakeProject;
