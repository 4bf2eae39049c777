//! Loads a named project from disk and resolves its schema

use crate::bridge::CsProjBridge;
use crate::resolver::{ResolveRequest, SchemaResolver};
use crate::schema::ProjectSchema;
use crate::Result;
use prj_config::{Platform, ProjectConfig, ProjectConfigLoader, YamlPackageConfigReader};
use prj_fs::{NormalizedPath, OsFileSystem};

/// Resolves projects stored under one projects directory, using the real
/// filesystem, YAML package configs and csproj files.
#[derive(Debug, Clone)]
pub struct ProjectSchemaLoader {
    configs: ProjectConfigLoader,
    fs: OsFileSystem,
    package_configs: YamlPackageConfigReader,
    bridge: CsProjBridge,
}

impl ProjectSchemaLoader {
    pub fn new(projects_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            configs: ProjectConfigLoader::new(projects_dir),
            fs: OsFileSystem::new(),
            package_configs: YamlPackageConfigReader::new(),
            bridge: CsProjBridge::new(),
        }
    }

    pub fn projects_dir(&self) -> &NormalizedPath {
        self.configs.projects_dir()
    }

    pub fn load_project_config(&self, project: &str) -> Result<ProjectConfig> {
        Ok(self.configs.load(project)?)
    }

    /// Resolve `project` for a single platform.
    pub fn load_schema(&self, project: &str, platform: Platform) -> Result<ProjectSchema> {
        let config = self.load_project_config(project)?;
        self.resolve(project, platform, &config)
    }

    /// Resolve `project` once for each of its configured target platforms.
    pub fn load_all_targets(&self, project: &str) -> Result<Vec<ProjectSchema>> {
        let config = self.load_project_config(project)?;
        config
            .target_platforms
            .iter()
            .map(|platform| self.resolve(project, *platform, &config))
            .collect()
    }

    fn resolve(
        &self,
        project: &str,
        platform: Platform,
        config: &ProjectConfig,
    ) -> Result<ProjectSchema> {
        let request =
            ResolveRequest::from_project_config(project, platform, config, self.projects_dir());
        SchemaResolver::new(&self.fs, &self.package_configs, &self.bridge).resolve(&request)
    }
}
