//! End-to-end tests for schema loading
//!
//! These exercise the whole flow from files on disk: layered project config
//! -> package configs -> csproj parsing -> resolution -> downstream plans.

use pretty_assertions::assert_eq;
use prj_config::Platform;
use prj_schema::{Error, OutputRoute, Placement, ProjectSchemaLoader};
use prj_test_utils::TestWorkspace;

const GLOBAL_CONFIG: &str = "\
PackageFolders:
  - ../UnityPackages
ProjectSettingsPath: ProjectSettings
";

fn workspace() -> TestWorkspace {
    prj_test_utils::init_test_logging();
    let ws = TestWorkspace::new();
    ws.write_global_project_config(GLOBAL_CONFIG);
    ws
}

fn loader(ws: &TestWorkspace) -> ProjectSchemaLoader {
    ProjectSchemaLoader::new(ws.projects_dir())
}

#[test]
fn resolves_project_from_yaml_files() {
    let ws = workspace();
    ws.add_package_with_config("Game", "Dependencies: [Net, Art]\n");
    ws.add_package_with_config("Net", "Dependencies:\n  - Core\n");
    ws.add_package("Core");
    ws.add_package("Art");
    ws.add_package_with_config("Tools", "FolderType: StreamingAssets\n");
    ws.write_project_config(
        "Demo",
        "\
PluginsFolder: [Game, Tools]
AssetsFolder: [Art]
SolutionProjects: [Core]
SolutionFolders:
  - Editor: /.*Editor
",
    );

    let schema = loader(&ws).load_schema("Demo", Platform::Windows).unwrap();

    assert_eq!(
        schema.packages().keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Art", "Core", "Game", "Net", "Tools"]
    );
    assert_eq!(schema.package("Game").unwrap().placement, Placement::Assets);
    assert_eq!(schema.package("Net").unwrap().placement, Placement::Plugins);
    assert!(schema.package("Net").unwrap().wants_dedicated_project);
    assert_eq!(
        schema.package("Tools").unwrap().output_route(),
        OutputRoute::StreamingAssetsDir
    );
    assert_eq!(schema.settings_path(), "ProjectSettings");
    assert_eq!(
        schema.custom_folder_groups(),
        &[("Editor".to_string(), "/.*Editor".to_string())]
    );
}

#[test]
fn user_config_extends_and_overrides_project_config() {
    let ws = workspace();
    ws.add_package("Core");
    ws.add_package("Debug");
    ws.add_package("Extra");
    ws.write_project_config("Demo", "PluginsFolder: [Core]\nProjectSettingsPath: Shared\n");
    ws.write_project_user_config(
        "Demo",
        "PluginsFolder: [Debug]\nAssetsFolder: [Extra]\nProjectSettingsPath!: Mine\n",
    );

    let schema = loader(&ws).load_schema("Demo", Platform::Windows).unwrap();

    assert!(schema.package("Core").is_some());
    assert!(schema.package("Debug").is_some());
    assert_eq!(schema.package("Extra").unwrap().placement, Placement::Assets);
    assert_eq!(schema.settings_path(), "Mine");
}

#[test]
fn resolves_each_target_platform() {
    let ws = workspace();
    ws.add_package("Game");
    ws.add_package_with_config("DroidGlue", "FolderType: AndroidProject\nPlatforms: [Windows]\n");
    ws.write_project_config(
        "Demo",
        "PluginsFolder: [Game, DroidGlue]\nTargetPlatforms: [Windows, android]\n",
    );

    let schemas = loader(&ws).load_all_targets("Demo").unwrap();

    let summary: Vec<(Platform, bool)> = schemas
        .iter()
        .map(|schema| (schema.platform(), schema.package("DroidGlue").is_some()))
        .collect();
    assert_eq!(summary, vec![(Platform::Windows, false), (Platform::Android, true)]);

    let android = &schemas[1];
    let link = android
        .link_plan()
        .into_iter()
        .find(|entry| entry.name == "DroidGlue")
        .unwrap();
    assert_eq!(link.route.relative_dir(), "Assets/Plugins/Android");
}

#[test]
fn prebuilt_packages_are_read_from_csproj_files() {
    let ws = workspace();
    ws.add_package_with_config(
        "Net",
        "AssemblyProject:\n  Path: build/Net.csproj\n  Config: Release\n",
    );
    ws.write_csproj("UnityPackages/Net/build/Net.csproj", "$(MSBuildProjectName)", &["Core"]);
    ws.add_package_with_config("Core", "AssemblyProject:\n  Path: Core.csproj\n");
    ws.write_csproj("UnityPackages/Core/Core.csproj", "core", &[]);
    ws.add_package_with_config("Game", "Dependencies: [Net]\n");
    ws.write_project_config("Demo", "PluginsFolder: [Game]\n");

    let schema = loader(&ws).load_schema("Demo", Platform::Windows).unwrap();

    let net = schema.package("Net").unwrap();
    assert_eq!(net.explicit_dependencies, vec!["Core"]);
    let link = net.external_link.as_ref().unwrap();
    assert_eq!(link.unit_name, "Net");
    assert_eq!(link.config.as_deref(), Some("Release"));

    let plan = schema.build_plan();
    let dedicated: Vec<&str> = plan.dedicated.iter().map(|unit| unit.name).collect();
    assert_eq!(dedicated, vec!["Core", "Game", "Net"]);
    assert!(plan.plugins.members.is_empty());
}

#[test]
fn scripts_inside_prebuilt_package_are_rejected() {
    let ws = workspace();
    ws.add_package_with_config("Net", "AssemblyProject:\n  Path: Net.csproj\n");
    ws.write_csproj("UnityPackages/Net/Net.csproj", "Net", &[]);
    ws.write_file("UnityPackages/Net/Src/Client.cs", "class Client {}\n");
    ws.write_project_config("Demo", "PluginsFolder: [Net]\n");

    let err = loader(&ws).load_schema("Demo", Platform::Windows).unwrap_err();

    assert!(matches!(err, Error::PrebuiltProjectHasScripts { ref package } if package == "Net"));
}

#[test]
fn cycle_declared_in_package_files_is_reported() {
    let ws = workspace();
    ws.add_package_with_config("A", "Dependencies: [B]\n");
    ws.add_package_with_config("B", "Dependencies: [A]\n");
    ws.write_project_config("Demo", "PluginsFolder: [A]\n");

    let err = loader(&ws).load_schema("Demo", Platform::Windows).unwrap_err();

    assert_eq!(err.to_string(), "Found circular dependency: A -> B -> A");
}

#[test]
fn package_config_errors_name_the_package() {
    let ws = workspace();
    ws.add_package_with_config("Broken", "FolderType: Spaceship\n");
    ws.write_project_config("Demo", "PluginsFolder: [Broken]\n");

    let err = loader(&ws).load_schema("Demo", Platform::Windows).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    let message = err.to_string();
    assert!(message.contains("Broken"), "{message}");
}

#[test]
fn missing_package_folders_setting_is_an_error() {
    let ws = TestWorkspace::new();
    ws.add_package("Core");
    ws.write_project_config("Demo", "PluginsFolder: [Core]\nProjectSettingsPath: X\n");

    let err = loader(&ws).load_schema("Demo", Platform::Windows).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("PackageFolders"));
}

#[test]
fn schema_exports_as_json() {
    let ws = workspace();
    ws.add_package("Core");
    ws.write_project_config("Demo", "PluginsFolder: [Core]\n");

    let schema = loader(&ws).load_schema("Demo", Platform::Ios).unwrap();
    let json: serde_json::Value = serde_json::from_str(&schema.to_json().unwrap()).unwrap();

    assert_eq!(json["platform"], "iOS");
    assert_eq!(json["packages"]["Core"]["placement"], "Plugins");
}
