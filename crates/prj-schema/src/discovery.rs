//! Package discovery: walks the reference graph outward from the project's
//! package lists and builds one record per package that survives platform
//! filtering.

use crate::model::{ExternalLink, PackageRecord, Placement};
use crate::patterns::DedicatedPatterns;
use crate::{Error, ExternalProjectBridge, ResolveRequest, Result};
use prj_config::{AssemblyProjectRef, PACKAGE_CONFIG_FILE_NAME, PackageConfigReader};
use prj_fs::{FileSystem, NormalizedPath};
use std::collections::{BTreeMap, HashSet, VecDeque};

pub(crate) struct Discoverer<'r> {
    pub fs: &'r dyn FileSystem,
    pub package_configs: &'r dyn PackageConfigReader,
    pub bridge: &'r dyn ExternalProjectBridge,
    pub request: &'r ResolveRequest,
    pub patterns: &'r DedicatedPatterns,
}

impl Discoverer<'_> {
    /// Discover every package reachable from the project lists.
    ///
    /// Packages excluded for the target platform are left out of the map,
    /// and their own references are not followed.
    pub fn run(&self) -> Result<BTreeMap<String, PackageRecord>> {
        let mut packages = BTreeMap::new();
        let mut dropped = 0usize;
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(String, String)> = VecDeque::new();

        let project_source = format!("project '{}'", self.request.project_name);
        for name in self
            .request
            .plugin_names
            .iter()
            .chain(&self.request.asset_names)
        {
            if seen.insert(name.clone()) {
                queue.push_back((name.clone(), project_source.clone()));
            }
        }

        while let Some((name, referenced_by)) = queue.pop_front() {
            let Some(record) = self.discover_package(&name, referenced_by)? else {
                dropped += 1;
                continue;
            };

            let source = format!("'{}'", record.source_dir.join(PACKAGE_CONFIG_FILE_NAME));
            for dependency in record
                .explicit_dependencies
                .iter()
                .chain(&record.grouped_dependencies)
                .chain(&record.extra_dependencies)
            {
                if seen.insert(dependency.clone()) {
                    queue.push_back((dependency.clone(), source.clone()));
                }
            }

            packages.insert(name, record);
        }

        tracing::debug!(
            discovered = packages.len(),
            dropped,
            "Package discovery finished"
        );

        Ok(packages)
    }

    fn find_package_dir(&self, name: &str, referenced_by: &str) -> Result<NormalizedPath> {
        self.request
            .package_roots
            .iter()
            .map(|root| root.join(name))
            .find(|dir| self.fs.dir_exists(dir))
            .ok_or_else(|| Error::MissingPackage {
                name: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    fn discover_package(&self, name: &str, referenced_by: String) -> Result<Option<PackageRecord>> {
        let source_dir = self.find_package_dir(name, &referenced_by)?;
        let config = self.package_configs.read(name, &source_dir)?;

        let platform = self.request.platform;
        let allowed = match config.folder_type.implied_platform() {
            Some(implied) => vec![implied],
            None => config.platforms.clone(),
        };
        if !allowed.is_empty() && !allowed.contains(&platform) {
            tracing::debug!(package = %name, platform = %platform, "Skipped package for platform");
            return Ok(None);
        }

        let placement = if config.force_assets_directory
            || self.request.asset_names.iter().any(|asset| asset == name)
        {
            Placement::Assets
        } else {
            Placement::Plugins
        };

        let mut record = PackageRecord::new(name, source_dir, placement);
        record.folder_type = config.folder_type;
        record.grouped_dependencies = config.group_with;
        record.extra_dependencies = config.extras;
        record.force_plugins_placement = config.force_plugins_directory;
        record.referenced_by = referenced_by;
        for dependency in &config.dependencies {
            record.add_explicit_dependency(dependency);
        }

        if let Some(assembly) = &config.assembly_project {
            let link = self.link_external_project(name, &record.source_dir, assembly)?;
            for reference in &link.references {
                record.add_explicit_dependency(reference);
            }
            record.external_link = Some(link);
        }

        record.wants_dedicated_project = record.is_prebuilt() || self.patterns.matches(name);

        Ok(Some(record))
    }

    fn link_external_project(
        &self,
        package: &str,
        package_dir: &NormalizedPath,
        assembly: &AssemblyProjectRef,
    ) -> Result<ExternalLink> {
        let configured = NormalizedPath::new(&assembly.path);
        let path = if configured.is_absolute() {
            configured
        } else {
            package_dir.join(&assembly.path)
        };

        if !self.fs.file_exists(&path) {
            return Err(Error::ExternalProjectNotFound {
                package: package.to_string(),
                path,
            });
        }

        let stem = path.file_stem().unwrap_or_default().to_string();
        if !stem.eq_ignore_ascii_case(package) {
            return Err(Error::AssemblyNameMismatch {
                package: package.to_string(),
                assembly: stem,
                path,
            });
        }

        let project = self
            .bridge
            .analyze(&path)
            .map_err(|source| Error::ExternalProject {
                package: package.to_string(),
                source: Box::new(source),
            })?;

        if !project.unit_name.eq_ignore_ascii_case(package) {
            return Err(Error::AssemblyNameMismatch {
                package: package.to_string(),
                assembly: project.unit_name,
                path,
            });
        }

        Ok(ExternalLink {
            project_path: path,
            config: assembly.config.clone(),
            unit_name: project.unit_name,
            references: project.references,
        })
    }
}

/// Packages that depend on a grouping package also depend on its group.
///
/// Only direct dependents are extended; a group reached through another
/// group is not followed. A dependent that is itself a group member does
/// not gain itself.
pub(crate) fn apply_grouped_dependencies(packages: &mut BTreeMap<String, PackageRecord>) {
    let groups: Vec<(String, Vec<String>)> = packages
        .values()
        .filter(|record| !record.grouped_dependencies.is_empty())
        .map(|record| (record.name.clone(), record.grouped_dependencies.clone()))
        .collect();

    if groups.is_empty() {
        return;
    }

    let additions: Vec<(String, Vec<String>)> = packages
        .values()
        .filter_map(|record| {
            let added: Vec<String> = groups
                .iter()
                .filter(|(group, _)| {
                    *group != record.name && record.explicit_dependencies.contains(group)
                })
                .flat_map(|(_, members)| members.iter())
                .filter(|member| **member != record.name)
                .cloned()
                .collect();
            (!added.is_empty()).then(|| (record.name.clone(), added))
        })
        .collect();

    for (name, added) in additions {
        if let Some(record) = packages.get_mut(&name) {
            tracing::debug!(package = %name, grouped = ?added, "Added grouped dependencies");
            for dependency in &added {
                record.add_explicit_dependency(dependency);
            }
        }
    }
}
