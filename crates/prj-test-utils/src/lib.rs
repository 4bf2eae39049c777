//! Shared test utilities for the prj workspace.
//!
//! This crate provides on-disk fixtures for package layouts so every crate's
//! test suite builds projects the same way. It is a dev-dependency only and
//! is never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace) builder for
//!   projects, packages and external project files
//! - [`csproj`]: minimal MSBuild project file bodies
//! - [`logging`]: opt-in tracing output for failing tests

pub mod csproj;
pub mod logging;
pub mod workspace;

pub use logging::init_test_logging;
pub use workspace::TestWorkspace;
