//! Layered configuration for the prj package layout tool.
//!
//! This crate turns YAML (or JSON/TOML) config documents into typed
//! [`ProjectConfig`] and [`PackageConfig`] values. Lookups go through the
//! [`ConfigView`] trait so the override (`Key!`) and fallback (`Key?`)
//! conventions live in one place.

pub mod error;
pub mod folder;
pub mod keys;
pub mod layered;
pub mod package;
pub mod platform;
pub mod project;
pub mod view;

/// Project config file, looked up both in the projects root and per project.
pub const PROJECT_CONFIG_FILE_NAME: &str = "ProjenyProject.yaml";

/// Per-user project overrides, layered on top of [`PROJECT_CONFIG_FILE_NAME`].
pub const PROJECT_USER_CONFIG_FILE_NAME: &str = "ProjenyProjectCustom.yaml";

/// Optional per-package config file at the root of a package directory.
pub const PACKAGE_CONFIG_FILE_NAME: &str = "ProjenyPackage.yaml";

pub use error::{Error, Result};
pub use folder::FolderType;
pub use layered::LayeredConfig;
pub use package::{AssemblyProjectRef, PackageConfig, PackageConfigReader, YamlPackageConfigReader};
pub use platform::Platform;
pub use project::{ProjectConfig, ProjectConfigLoader};
pub use view::ConfigView;
