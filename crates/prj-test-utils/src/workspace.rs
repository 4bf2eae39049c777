//! [`TestWorkspace`] builder for package layout scenarios.

use crate::csproj::csproj_xml;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECTS_DIR: &str = "UnityProjects";
const PACKAGES_DIR: &str = "UnityPackages";
const PROJECT_CONFIG: &str = "ProjenyProject.yaml";
const PROJECT_USER_CONFIG: &str = "ProjenyProjectCustom.yaml";
const PACKAGE_CONFIG: &str = "ProjenyPackage.yaml";

/// A temporary directory laid out like a real checkout:
///
/// ```text
/// <root>/
///   UnityProjects/<project>/ProjenyProject.yaml
///   UnityPackages/<package>/ProjenyPackage.yaml
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use prj_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.add_package("Core");
/// ws.add_package_with_config("Game", "Dependencies: [Core]\n");
/// ws.write_project_config("Demo", "AssetsFolder: [Game]\n");
/// ws.assert_file_exists("UnityPackages/Game/ProjenyPackage.yaml");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty workspace with the projects and packages directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap_or_else(|e| panic!("TestWorkspace: {e}"));
        let ws = Self { temp_dir };
        ws.mkdir(PROJECTS_DIR);
        ws.mkdir(PACKAGES_DIR);
        ws
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the workspace.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.path(PROJECTS_DIR)
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.path(PACKAGES_DIR)
    }

    /// Create a directory (and parents) inside the workspace.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let dir = self.path(relative);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("TestWorkspace: failed to create {}: {e}", dir.display()));
        dir
    }

    /// Write a file (creating parents) inside the workspace.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let file = self.path(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("TestWorkspace: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("TestWorkspace: failed to write {}: {e}", file.display()));
        file
    }

    /// Create an empty package directory under the default packages root.
    pub fn add_package(&self, name: &str) -> PathBuf {
        self.mkdir(&format!("{PACKAGES_DIR}/{name}"))
    }

    /// Create a package directory holding a `ProjenyPackage.yaml`.
    pub fn add_package_with_config(&self, name: &str, yaml: &str) -> PathBuf {
        let dir = self.add_package(name);
        self.write_file(&format!("{PACKAGES_DIR}/{name}/{PACKAGE_CONFIG}"), yaml);
        dir
    }

    /// Create a package directory under an arbitrary root (e.g. a second
    /// search folder).
    pub fn add_package_in(&self, root: &str, name: &str) -> PathBuf {
        self.mkdir(&format!("{root}/{name}"))
    }

    /// Write `<projects>/<project>/ProjenyProject.yaml`.
    pub fn write_project_config(&self, project: &str, yaml: &str) -> PathBuf {
        self.write_file(&format!("{PROJECTS_DIR}/{project}/{PROJECT_CONFIG}"), yaml)
    }

    /// Write `<projects>/<project>/ProjenyProjectCustom.yaml`.
    pub fn write_project_user_config(&self, project: &str, yaml: &str) -> PathBuf {
        self.write_file(
            &format!("{PROJECTS_DIR}/{project}/{PROJECT_USER_CONFIG}"),
            yaml,
        )
    }

    /// Write `<projects>/ProjenyProject.yaml`, shared by every project.
    pub fn write_global_project_config(&self, yaml: &str) -> PathBuf {
        self.write_file(&format!("{PROJECTS_DIR}/{PROJECT_CONFIG}"), yaml)
    }

    /// Write an MSBuild project file at `relative`.
    pub fn write_csproj(
        &self,
        relative: &str,
        assembly_name: &str,
        references: &[&str],
    ) -> PathBuf {
        self.write_file(relative, &csproj_xml(assembly_name, references))
    }

    /// Assert that a file exists at `relative`.
    ///
    /// # Panics
    /// Panics with the full path if the file is missing.
    pub fn assert_file_exists(&self, relative: &str) {
        let file = self.path(relative);
        assert!(file.is_file(), "expected file at {}", file.display());
    }
}
