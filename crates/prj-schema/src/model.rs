//! Resolved package records and their output routing

use prj_config::FolderType;
use prj_fs::NormalizedPath;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The two output buckets a package can land in.
///
/// Plugins is compiled first and cannot see anything in Assets, so a Plugins
/// package that needs an Assets package has to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Placement {
    Plugins,
    Assets,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Plugins => "Plugins",
            Placement::Assets => "Assets",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where inside the generated project a package directory is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutputRoute {
    PluginsDir,
    ProjectAssetsDir,
    PluginsAndroidDir,
    PluginsAndroidLibraryDir,
    PluginsIosLibraryDir,
    PluginsWebGlLibraryDir,
    StreamingAssetsDir,
}

impl OutputRoute {
    pub fn for_package(folder_type: FolderType, placement: Placement) -> Self {
        match folder_type {
            FolderType::AndroidProject => OutputRoute::PluginsAndroidDir,
            FolderType::AndroidLibraries => OutputRoute::PluginsAndroidLibraryDir,
            FolderType::Ios => OutputRoute::PluginsIosLibraryDir,
            FolderType::WebGl => OutputRoute::PluginsWebGlLibraryDir,
            FolderType::StreamingAssets => OutputRoute::StreamingAssetsDir,
            FolderType::Normal => match placement {
                Placement::Plugins => OutputRoute::PluginsDir,
                Placement::Assets => OutputRoute::ProjectAssetsDir,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputRoute::PluginsDir => "PluginsDir",
            OutputRoute::ProjectAssetsDir => "ProjectAssetsDir",
            OutputRoute::PluginsAndroidDir => "PluginsAndroidDir",
            OutputRoute::PluginsAndroidLibraryDir => "PluginsAndroidLibraryDir",
            OutputRoute::PluginsIosLibraryDir => "PluginsIosLibraryDir",
            OutputRoute::PluginsWebGlLibraryDir => "PluginsWebGlLibraryDir",
            OutputRoute::StreamingAssetsDir => "StreamingAssetsDir",
        }
    }

    /// Directory relative to the generated project root.
    pub fn relative_dir(&self) -> &'static str {
        match self {
            OutputRoute::PluginsDir => "Assets/Plugins",
            OutputRoute::ProjectAssetsDir => "Assets",
            OutputRoute::PluginsAndroidDir => "Assets/Plugins/Android",
            OutputRoute::PluginsAndroidLibraryDir => "Assets/Plugins/Android/libs",
            OutputRoute::PluginsIosLibraryDir => "Assets/Plugins/iOS",
            OutputRoute::PluginsWebGlLibraryDir => "Assets/Plugins/WebGL",
            OutputRoute::StreamingAssetsDir => "Assets/StreamingAssets",
        }
    }
}

impl fmt::Display for OutputRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package built outside the generated solution and consumed as a binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub project_path: NormalizedPath,
    pub config: Option<String>,

    /// Name declared by the external project, as written there
    pub unit_name: String,

    /// Project names the external project references
    pub references: Vec<String>,
}

/// Everything known about one package of a resolved project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub source_dir: NormalizedPath,
    pub folder_type: FolderType,
    pub placement: Placement,

    /// Direct references, in declaration order, without duplicates
    pub explicit_dependencies: Vec<String>,
    pub grouped_dependencies: Vec<String>,
    pub extra_dependencies: Vec<String>,

    pub force_plugins_placement: bool,
    pub wants_dedicated_project: bool,

    /// Transitive closure of `explicit_dependencies`; `None` until computed
    pub all_dependencies: Option<BTreeSet<String>>,

    pub external_link: Option<ExternalLink>,

    /// Where the package was first referenced, for error messages
    #[serde(skip)]
    pub referenced_by: String,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, source_dir: NormalizedPath, placement: Placement) -> Self {
        Self {
            name: name.into(),
            source_dir,
            folder_type: FolderType::Normal,
            placement,
            explicit_dependencies: Vec::new(),
            grouped_dependencies: Vec::new(),
            extra_dependencies: Vec::new(),
            force_plugins_placement: false,
            wants_dedicated_project: false,
            all_dependencies: None,
            external_link: None,
            referenced_by: String::new(),
        }
    }

    pub fn output_route(&self) -> OutputRoute {
        OutputRoute::for_package(self.folder_type, self.placement)
    }

    /// Whether the package links a prebuilt external project.
    pub fn is_prebuilt(&self) -> bool {
        self.external_link.is_some()
    }

    /// The transitive dependencies, or nothing before closure has run.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.all_dependencies
            .iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.all_dependencies
            .as_ref()
            .is_some_and(|deps| deps.contains(name))
    }

    /// Add a direct dependency unless it is already declared.
    pub fn add_explicit_dependency(&mut self, name: &str) {
        if !self.explicit_dependencies.iter().any(|dep| dep == name) {
            self.explicit_dependencies.push(name.to_string());
        }
    }
}
