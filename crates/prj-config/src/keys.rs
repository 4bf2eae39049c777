//! Config key names.
//!
//! Every typed field of [`ProjectConfig`](crate::ProjectConfig) and
//! [`PackageConfig`](crate::PackageConfig) is read through exactly one of
//! these keys. The tables at the bottom list the full vocabulary per file
//! kind, so unknown keys can be reported.

// Project level
pub const PLUGINS_FOLDER: &str = "PluginsFolder";
pub const ASSETS_FOLDER: &str = "AssetsFolder";
pub const SOLUTION_PROJECTS: &str = "SolutionProjects";
pub const SOLUTION_FOLDERS: &str = "SolutionFolders";
pub const TARGET_PLATFORMS: &str = "TargetPlatforms";
pub const PACKAGE_FOLDERS: &str = "PackageFolders";
pub const PROJECT_SETTINGS_PATH: &str = "ProjectSettingsPath";

// Package level
pub const FOLDER_TYPE: &str = "FolderType";
pub const DEPENDENCIES: &str = "Dependencies";
pub const GROUP_WITH: &str = "GroupWith";
pub const EXTRAS: &str = "Extras";
pub const PLATFORMS: &str = "Platforms";
pub const FORCE_ASSETS_DIRECTORY: &str = "ForceAssetsDirectory";
pub const FORCE_PLUGINS_DIRECTORY: &str = "ForcePluginsDirectory";
pub const ASSEMBLY_PROJECT: &str = "AssemblyProject";
pub const ASSEMBLY_PROJECT_PATH: &str = "Path";
pub const ASSEMBLY_PROJECT_CONFIG: &str = "Config";

/// Suffix marking a value that overrides every other layer.
pub const OVERRIDE_SUFFIX: &str = "!";

/// Suffix marking a value used only when no layer sets the plain key.
pub const FALLBACK_SUFFIX: &str = "?";

pub const PROJECT_KEYS: &[&str] = &[
    PLUGINS_FOLDER,
    ASSETS_FOLDER,
    SOLUTION_PROJECTS,
    SOLUTION_FOLDERS,
    TARGET_PLATFORMS,
    PACKAGE_FOLDERS,
    PROJECT_SETTINGS_PATH,
];

pub const PACKAGE_KEYS: &[&str] = &[
    FOLDER_TYPE,
    DEPENDENCIES,
    GROUP_WITH,
    EXTRAS,
    PLATFORMS,
    FORCE_ASSETS_DIRECTORY,
    FORCE_PLUGINS_DIRECTORY,
    ASSEMBLY_PROJECT,
];

/// Strip an override or fallback suffix from a key.
pub fn base_key(key: &str) -> &str {
    key.strip_suffix(OVERRIDE_SUFFIX)
        .or_else(|| key.strip_suffix(FALLBACK_SUFFIX))
        .unwrap_or(key)
}
