//! Per-package configuration

use crate::keys;
use crate::{
    ConfigView, Error, FolderType, LayeredConfig, PACKAGE_CONFIG_FILE_NAME, Platform, Result,
};
use prj_fs::NormalizedPath;
use serde::Serialize;

/// Link from a package to an externally authored, prebuilt build project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyProjectRef {
    /// Project file path, relative to the package directory unless absolute
    pub path: String,

    /// Build configuration to use for the external project, if pinned
    pub config: Option<String>,
}

/// Typed view of a package's optional `ProjenyPackage.yaml`.
///
/// A package without a config file gets `PackageConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageConfig {
    pub folder_type: FolderType,

    /// Packages this one references directly
    pub dependencies: Vec<String>,

    /// Packages pulled in alongside this one by anything that depends on it
    pub group_with: Vec<String>,

    /// Packages added to the project without creating a dependency edge
    pub extras: Vec<String>,

    /// Explicit platform allow-list; empty means every platform
    pub platforms: Vec<Platform>,

    pub force_assets_directory: bool,
    pub force_plugins_directory: bool,
    pub assembly_project: Option<AssemblyProjectRef>,
}

impl PackageConfig {
    pub fn from_view(view: &dyn ConfigView) -> Result<Self> {
        let folder_type = match view.try_get_string(&[keys::FOLDER_TYPE])? {
            Some(value) => value.parse()?,
            None => FolderType::Normal,
        };

        let platforms = match view.try_get_list(&[keys::PLATFORMS])? {
            Some(names) => Platform::parse_list(&names)?,
            None => Vec::new(),
        };

        let assembly_project = view
            .try_get_string(&[keys::ASSEMBLY_PROJECT, keys::ASSEMBLY_PROJECT_PATH])?
            .map(|path| -> Result<AssemblyProjectRef> {
                Ok(AssemblyProjectRef {
                    path,
                    config: view
                        .try_get_string(&[keys::ASSEMBLY_PROJECT, keys::ASSEMBLY_PROJECT_CONFIG])?,
                })
            })
            .transpose()?;

        Ok(Self {
            folder_type,
            dependencies: list_or_empty(view, keys::DEPENDENCIES)?,
            group_with: list_or_empty(view, keys::GROUP_WITH)?,
            extras: list_or_empty(view, keys::EXTRAS)?,
            platforms,
            force_assets_directory: view
                .try_get_bool(&[keys::FORCE_ASSETS_DIRECTORY])?
                .unwrap_or(false),
            force_plugins_directory: view
                .try_get_bool(&[keys::FORCE_PLUGINS_DIRECTORY])?
                .unwrap_or(false),
            assembly_project,
        })
    }
}

fn list_or_empty(view: &dyn ConfigView, key: &str) -> Result<Vec<String>> {
    Ok(view.try_get_list(&[key])?.unwrap_or_default())
}

/// Loads the config of one package.
pub trait PackageConfigReader {
    /// Read the config for `package_name`, whose directory is `package_dir`.
    ///
    /// A package without a config file yields default values, not an error.
    fn read(&self, package_name: &str, package_dir: &NormalizedPath) -> Result<PackageConfig>;
}

/// Reads `ProjenyPackage.yaml` from the package directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlPackageConfigReader;

impl YamlPackageConfigReader {
    pub fn new() -> Self {
        Self
    }

    pub fn config_path(package_dir: &NormalizedPath) -> NormalizedPath {
        package_dir.join(PACKAGE_CONFIG_FILE_NAME)
    }
}

impl PackageConfigReader for YamlPackageConfigReader {
    fn read(&self, package_name: &str, package_dir: &NormalizedPath) -> Result<PackageConfig> {
        let path = Self::config_path(package_dir);
        let view = LayeredConfig::load_existing([&path])
            .map_err(|e| Error::in_package(package_name, e))?;

        if view.is_empty() {
            return Ok(PackageConfig::default());
        }

        for key in view.top_level_keys() {
            if !keys::PACKAGE_KEYS.contains(&key.as_str()) {
                tracing::warn!(package = package_name, %key, "Ignoring unknown package config key");
            }
        }

        PackageConfig::from_view(&view).map_err(|e| Error::in_package(package_name, e))
    }
}
