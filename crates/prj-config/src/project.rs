//! Project-level configuration
//!
//! A project's config is merged from up to four files under the projects
//! directory, in increasing priority:
//!
//! ```text
//! <projects>/<name>/ProjenyProject.yaml
//! <projects>/<name>/ProjenyProjectCustom.yaml
//! <projects>/ProjenyProject.yaml
//! <projects>/ProjenyProjectCustom.yaml
//! ```
//!
//! The shared files sit on top, so a machine-wide custom file can pin a
//! value for every project.

use crate::keys;
use crate::{
    ConfigView, LayeredConfig, PROJECT_CONFIG_FILE_NAME, PROJECT_USER_CONFIG_FILE_NAME, Platform,
    Result,
};
use prj_fs::NormalizedPath;
use serde::Serialize;
use std::collections::HashSet;

/// Typed view of a project's merged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    /// Packages placed in the Plugins bucket, de-duplicated
    pub plugins_folder: Vec<String>,

    /// Packages placed in the Assets bucket, de-duplicated
    pub assets_folder: Vec<String>,

    /// Dedicated-project patterns: exact names, or `/`-prefixed regexes
    pub solution_projects: Vec<String>,

    /// Ordered (folder name, pattern) pairs, passed through untouched
    pub solution_folders: Vec<(String, String)>,

    pub target_platforms: Vec<Platform>,

    /// Directories searched, in order, for package directories
    pub package_folders: Vec<String>,

    pub project_settings_path: String,
}

impl ProjectConfig {
    /// Read a project config from any view.
    ///
    /// `PackageFolders` and `ProjectSettingsPath` are required;
    /// `TargetPlatforms` defaults to Windows.
    pub fn from_view(view: &dyn ConfigView) -> Result<Self> {
        let target_platforms = match view.try_get_list(&[keys::TARGET_PLATFORMS])? {
            Some(names) => Platform::parse_list(&names)?,
            None => vec![Platform::Windows],
        };

        Ok(Self {
            plugins_folder: dedupe(view.try_get_list(&[keys::PLUGINS_FOLDER])?.unwrap_or_default()),
            assets_folder: dedupe(view.try_get_list(&[keys::ASSETS_FOLDER])?.unwrap_or_default()),
            solution_projects: view
                .try_get_list(&[keys::SOLUTION_PROJECTS])?
                .unwrap_or_default(),
            solution_folders: view
                .try_get_ordered_pairs(&[keys::SOLUTION_FOLDERS])?
                .unwrap_or_default(),
            target_platforms,
            package_folders: view.get_list(&[keys::PACKAGE_FOLDERS])?,
            project_settings_path: view.get_string(&[keys::PROJECT_SETTINGS_PATH])?,
        })
    }

    /// Package search roots; relative entries are resolved against `base`.
    pub fn package_roots(&self, base: &NormalizedPath) -> Vec<NormalizedPath> {
        self.package_folders
            .iter()
            .map(|folder| {
                let path = NormalizedPath::new(folder);
                if path.is_absolute() {
                    path
                } else {
                    base.join(folder)
                }
            })
            .collect()
    }
}

fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Locates and merges the config files for named projects.
#[derive(Debug, Clone)]
pub struct ProjectConfigLoader {
    projects_dir: NormalizedPath,
}

impl ProjectConfigLoader {
    /// # Arguments
    ///
    /// * `projects_dir` - Directory holding one sub-directory per project
    pub fn new(projects_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            projects_dir: projects_dir.into(),
        }
    }

    pub fn projects_dir(&self) -> &NormalizedPath {
        &self.projects_dir
    }

    /// Candidate config files for `project`, lowest priority first.
    pub fn config_paths(&self, project: &str) -> Vec<NormalizedPath> {
        let project_dir = self.projects_dir.join(project);
        vec![
            project_dir.join(PROJECT_CONFIG_FILE_NAME),
            project_dir.join(PROJECT_USER_CONFIG_FILE_NAME),
            self.projects_dir.join(PROJECT_CONFIG_FILE_NAME),
            self.projects_dir.join(PROJECT_USER_CONFIG_FILE_NAME),
        ]
    }

    /// Merge the existing config files for `project` into a layered view.
    pub fn load_view(&self, project: &str) -> Result<LayeredConfig> {
        let paths = self.config_paths(project);
        tracing::debug!(project, "Loading project config");
        LayeredConfig::load_existing(&paths)
    }

    pub fn load(&self, project: &str) -> Result<ProjectConfig> {
        let view = self.load_view(project)?;

        for key in view.top_level_keys() {
            if !keys::PROJECT_KEYS.contains(&key.as_str()) {
                tracing::warn!(project, %key, "Ignoring unknown project config key");
            }
        }

        ProjectConfig::from_view(&view)
    }
}
