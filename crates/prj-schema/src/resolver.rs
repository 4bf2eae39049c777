//! Schema resolution
//!
//! [`SchemaResolver`] takes its collaborators as trait objects so callers
//! (and tests) decide where packages, configs and external projects come
//! from. One call to [`SchemaResolver::resolve`] is a pure function of the
//! request and the filesystem at that moment.

use crate::bridge::ExternalProjectBridge;
use crate::discovery::{self, Discoverer};
use crate::model::PackageRecord;
use crate::patterns::DedicatedPatterns;
use crate::schema::ProjectSchema;
use crate::{Error, Result, classify, closure, tree};
use prj_config::{PackageConfigReader, Platform, ProjectConfig};
use prj_fs::{FileSystem, NormalizedPath};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Stages of a single resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Discovering,
    ClosureComputing,
    Classifying,
    Validating,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Discovering => "discovering",
            Phase::ClosureComputing => "closure-computing",
            Phase::Classifying => "classifying",
            Phase::Validating => "validating",
        };
        f.write_str(name)
    }
}

/// Inputs for resolving one project on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub project_name: String,
    pub platform: Platform,
    pub plugin_names: Vec<String>,
    pub asset_names: Vec<String>,

    /// Exact package names, or `/`-prefixed regular expressions
    pub dedicated_patterns: Vec<String>,

    /// Searched in order; the first root containing the package wins
    pub package_roots: Vec<NormalizedPath>,

    pub custom_folder_groups: Vec<(String, String)>,
    pub settings_path: String,
}

impl ResolveRequest {
    pub fn new(project_name: impl Into<String>, platform: Platform) -> Self {
        Self {
            project_name: project_name.into(),
            platform,
            plugin_names: Vec::new(),
            asset_names: Vec::new(),
            dedicated_patterns: Vec::new(),
            package_roots: Vec::new(),
            custom_folder_groups: Vec::new(),
            settings_path: String::new(),
        }
    }

    /// Build a request from a loaded project config. Relative package
    /// folders are resolved against `base`.
    pub fn from_project_config(
        project_name: impl Into<String>,
        platform: Platform,
        config: &ProjectConfig,
        base: &NormalizedPath,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            platform,
            plugin_names: config.plugins_folder.clone(),
            asset_names: config.assets_folder.clone(),
            dedicated_patterns: config.solution_projects.clone(),
            package_roots: config.package_roots(base),
            custom_folder_groups: config.solution_folders.clone(),
            settings_path: config.project_settings_path.clone(),
        }
    }

    pub fn with_plugins<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.plugin_names
            .extend(names.iter().map(|name| name.as_ref().to_string()));
        self
    }

    pub fn with_assets<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.asset_names
            .extend(names.iter().map(|name| name.as_ref().to_string()));
        self
    }

    pub fn with_dedicated_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.dedicated_patterns
            .extend(patterns.iter().map(|pattern| pattern.as_ref().to_string()));
        self
    }

    pub fn with_package_root(mut self, root: impl Into<NormalizedPath>) -> Self {
        self.package_roots.push(root.into());
        self
    }

    pub fn with_custom_folder_group(
        mut self,
        folder: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        self.custom_folder_groups.push((folder.into(), pattern.into()));
        self
    }

    pub fn with_settings_path(mut self, path: impl Into<String>) -> Self {
        self.settings_path = path.into();
        self
    }

    fn check_disjoint(&self) -> Result<()> {
        let plugins: HashSet<&str> = self.plugin_names.iter().map(String::as_str).collect();
        match self
            .asset_names
            .iter()
            .find(|name| plugins.contains(name.as_str()))
        {
            Some(name) => Err(Error::DuplicatePlacement { name: name.clone() }),
            None => Ok(()),
        }
    }
}

/// Resolves package lists into a [`ProjectSchema`].
pub struct SchemaResolver<'a> {
    fs: &'a dyn FileSystem,
    package_configs: &'a dyn PackageConfigReader,
    bridge: &'a dyn ExternalProjectBridge,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        package_configs: &'a dyn PackageConfigReader,
        bridge: &'a dyn ExternalProjectBridge,
    ) -> Self {
        Self {
            fs,
            package_configs,
            bridge,
        }
    }

    /// Resolve `request` into a complete schema, or fail without any
    /// partial result.
    pub fn resolve(&self, request: &ResolveRequest) -> Result<ProjectSchema> {
        let span = tracing::debug_span!(
            "resolve",
            project = %request.project_name,
            platform = %request.platform
        );
        let _guard = span.enter();

        self.run(request)
            .inspect_err(|e| tracing::debug!(error = %e, "Schema resolution failed"))
    }

    fn run(&self, request: &ResolveRequest) -> Result<ProjectSchema> {
        enter(Phase::Discovering);
        request.check_disjoint()?;
        let patterns = DedicatedPatterns::compile(&request.dedicated_patterns)?;

        let mut packages = Discoverer {
            fs: self.fs,
            package_configs: self.package_configs,
            bridge: self.bridge,
            request,
            patterns: &patterns,
        }
        .run()?;

        patterns.ensure_exact_matched(|name| packages.contains_key(name))?;
        discovery::apply_grouped_dependencies(&mut packages);
        self.check_prebuilt_packages(&packages)?;

        enter(Phase::ClosureComputing);
        let edges: BTreeMap<String, Vec<String>> = packages
            .iter()
            .map(|(name, record)| (name.clone(), record.explicit_dependencies.clone()))
            .collect();
        for (name, closure) in closure::transitive_closures(&edges)? {
            if let Some(record) = packages.get_mut(&name) {
                record.all_dependencies = Some(closure);
            }
        }
        tracing::debug!(
            "Dependency tree:\n{}",
            tree::render_dependency_tree(&packages)
        );

        enter(Phase::Classifying);
        let mut promotions = classify::expose_prebuilt_dependencies(&mut packages);
        promotions.extend(classify::classify(&mut packages));

        enter(Phase::Validating);
        classify::check_forced_placement(&packages, &promotions)?;
        self.ensure_sources_exist(&packages)?;

        tracing::debug!(packages = packages.len(), "Resolved project schema");

        Ok(ProjectSchema::new(
            request.project_name.clone(),
            request.platform,
            packages,
            request.custom_folder_groups.clone(),
            request.settings_path.clone(),
            promotions,
        ))
    }

    /// Prebuilt packages ship no scripts and only reference other prebuilt
    /// packages.
    fn check_prebuilt_packages(&self, packages: &BTreeMap<String, PackageRecord>) -> Result<()> {
        for record in packages.values() {
            let Some(link) = &record.external_link else {
                continue;
            };

            if self
                .fs
                .contains_files_with_extension(&record.source_dir, "cs")?
            {
                return Err(Error::PrebuiltProjectHasScripts {
                    package: record.name.clone(),
                });
            }

            for reference in &link.references {
                if packages.get(reference).is_some_and(|dep| !dep.is_prebuilt()) {
                    return Err(Error::PrebuiltDependencyNotPrebuilt {
                        package: record.name.clone(),
                        dependency: reference.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn ensure_sources_exist(&self, packages: &BTreeMap<String, PackageRecord>) -> Result<()> {
        match packages
            .values()
            .find(|record| !self.fs.dir_exists(&record.source_dir))
        {
            Some(record) => Err(Error::MissingPackage {
                name: record.name.clone(),
                referenced_by: format!(
                    "{} (directory {} disappeared during resolution)",
                    record.referenced_by, record.source_dir
                ),
            }),
            None => Ok(()),
        }
    }
}

fn enter(phase: Phase) {
    tracing::debug!(%phase, "Entering resolution phase");
}
