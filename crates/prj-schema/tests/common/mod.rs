#![allow(dead_code)]

use prj_config::{AssemblyProjectRef, PackageConfig, PackageConfigReader, Platform};
use prj_fs::{FileSystem, NormalizedPath};
use prj_schema::{Error, ExternalProject, ExternalProjectBridge, ResolveRequest, SchemaResolver};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

pub const PACKAGES_ROOT: &str = "/work/UnityPackages";
pub const PROJECT: &str = "Demo";

/// In-memory filesystem whose directories can be told to disappear.
#[derive(Default)]
pub struct FakeFileSystem {
    pub dirs: BTreeSet<NormalizedPath>,
    pub files: BTreeSet<NormalizedPath>,
    pub dirs_with_scripts: BTreeSet<NormalizedPath>,
    vanishing: RefCell<HashMap<NormalizedPath, usize>>,
}

impl FakeFileSystem {
    /// `dir` answers "exists" `checks` more times, then stops existing.
    pub fn vanish_after(&mut self, dir: NormalizedPath, checks: usize) {
        self.vanishing.get_mut().insert(dir, checks);
    }
}

impl FileSystem for FakeFileSystem {
    fn dir_exists(&self, path: &NormalizedPath) -> bool {
        if !self.dirs.contains(path) {
            return false;
        }
        match self.vanishing.borrow_mut().get_mut(path) {
            Some(0) => false,
            Some(remaining) => {
                *remaining -= 1;
                true
            }
            None => true,
        }
    }

    fn file_exists(&self, path: &NormalizedPath) -> bool {
        self.files.contains(path)
    }

    fn contains_files_with_extension(
        &self,
        dir: &NormalizedPath,
        extension: &str,
    ) -> prj_fs::Result<bool> {
        Ok(extension == "cs" && self.dirs_with_scripts.contains(dir))
    }
}

#[derive(Default)]
pub struct FakePackageConfigs {
    pub configs: HashMap<String, PackageConfig>,
}

impl PackageConfigReader for FakePackageConfigs {
    fn read(
        &self,
        package_name: &str,
        _package_dir: &NormalizedPath,
    ) -> prj_config::Result<PackageConfig> {
        Ok(self.configs.get(package_name).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeBridge {
    pub projects: HashMap<NormalizedPath, ExternalProject>,
}

impl ExternalProjectBridge for FakeBridge {
    fn analyze(&self, path: &NormalizedPath) -> prj_schema::Result<ExternalProject> {
        self.projects
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ExternalProjectParse {
                path: path.clone(),
                message: "no such project".into(),
            })
    }
}

/// A package world held entirely in memory.
#[derive(Default)]
pub struct Fixture {
    pub fs: FakeFileSystem,
    pub configs: FakePackageConfigs,
    pub bridge: FakeBridge,
}

pub fn package_dir(name: &str) -> NormalizedPath {
    NormalizedPath::new(PACKAGES_ROOT).join(name)
}

impl Fixture {
    pub fn new() -> Self {
        prj_test_utils::init_test_logging();
        Self::default()
    }

    /// Add a package directory and return its config for editing.
    pub fn package(&mut self, name: &str) -> &mut PackageConfig {
        self.fs.dirs.insert(package_dir(name));
        self.configs.configs.entry(name.to_string()).or_default()
    }

    /// Add a package with plain dependencies.
    pub fn package_with_deps(&mut self, name: &str, deps: &[&str]) -> &mut PackageConfig {
        let config = self.package(name);
        config.dependencies = deps.iter().map(|dep| dep.to_string()).collect();
        config
    }

    /// Add a package that links `<name>.csproj` declaring `unit_name`.
    pub fn prebuilt(
        &mut self,
        name: &str,
        unit_name: &str,
        references: &[&str],
    ) -> &mut PackageConfig {
        let project_path = package_dir(name).join(&format!("{name}.csproj"));
        self.fs.files.insert(project_path.clone());
        self.bridge.projects.insert(
            project_path,
            ExternalProject {
                unit_name: unit_name.to_string(),
                references: references.iter().map(|r| r.to_string()).collect(),
            },
        );
        let config = self.package(name);
        config.assembly_project = Some(AssemblyProjectRef {
            path: format!("{name}.csproj"),
            config: None,
        });
        config
    }

    pub fn resolver(&self) -> SchemaResolver<'_> {
        SchemaResolver::new(&self.fs, &self.configs, &self.bridge)
    }

    pub fn request(&self, platform: Platform) -> ResolveRequest {
        ResolveRequest::new(PROJECT, platform).with_package_root(PACKAGES_ROOT)
    }
}
