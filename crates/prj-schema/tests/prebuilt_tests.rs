mod common;

use common::{Fixture, package_dir};
use prj_config::{AssemblyProjectRef, Platform};
use prj_fs::NormalizedPath;
use prj_schema::{Error, ExternalProject, PromotionKind};

#[test]
fn prebuilt_references_become_dependencies() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Net", &["Core"]);
    world.prebuilt("Core", "Core", &[]);

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let schema = world.resolver().resolve(&request).unwrap();

    let net = schema.package("Net").unwrap();
    assert_eq!(net.explicit_dependencies, vec!["Core"]);
    assert!(net.wants_dedicated_project);
    assert!(schema.package("Core").unwrap().wants_dedicated_project);

    let link = net.external_link.as_ref().unwrap();
    assert_eq!(link.project_path, package_dir("Net").join("Net.csproj"));
    assert_eq!(link.references, vec!["Core"]);
}

#[test]
fn unit_name_comparison_ignores_case() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "NET", &[]);

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let schema = world.resolver().resolve(&request).unwrap();

    let link = schema.package("Net").unwrap().external_link.as_ref().unwrap();
    assert_eq!(link.unit_name, "NET");
}

#[test]
fn different_unit_name_is_rejected() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Networking", &[]);

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let err = world.resolver().resolve(&request).unwrap_err();

    match err {
        Error::AssemblyNameMismatch { package, assembly, .. } => {
            assert_eq!(package, "Net");
            assert_eq!(assembly, "Networking");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn project_file_must_be_named_after_package() {
    let mut world = Fixture::new();
    let path = package_dir("Net").join("Other.csproj");
    world.fs.files.insert(path.clone());
    world.bridge.projects.insert(
        path,
        ExternalProject {
            unit_name: "Net".into(),
            references: vec![],
        },
    );
    world.package("Net").assembly_project = Some(AssemblyProjectRef {
        path: "Other.csproj".into(),
        config: None,
    });

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let err = world.resolver().resolve(&request).unwrap_err();

    assert!(matches!(err, Error::AssemblyNameMismatch { ref assembly, .. } if assembly == "Other"));
}

#[test]
fn absolute_project_path_is_used_as_is() {
    let mut world = Fixture::new();
    let path = NormalizedPath::new("/external/builds/Net.csproj");
    world.fs.files.insert(path.clone());
    world.bridge.projects.insert(
        path.clone(),
        ExternalProject {
            unit_name: "Net".into(),
            references: vec![],
        },
    );
    world.package("Net").assembly_project = Some(AssemblyProjectRef {
        path: path.as_str().to_string(),
        config: Some("Release".into()),
    });

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let schema = world.resolver().resolve(&request).unwrap();

    let link = schema.package("Net").unwrap().external_link.as_ref().unwrap();
    assert_eq!(link.project_path, path);
    assert_eq!(link.config.as_deref(), Some("Release"));
}

#[test]
fn missing_project_file_is_reported() {
    let mut world = Fixture::new();
    world.package("Net").assembly_project = Some(AssemblyProjectRef {
        path: "Net.csproj".into(),
        config: None,
    });

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let err = world.resolver().resolve(&request).unwrap_err();

    assert!(matches!(err, Error::ExternalProjectNotFound { ref package, .. } if package == "Net"));
}

#[test]
fn bridge_failure_is_attributed_to_package() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Net", &[]);
    world.bridge.projects.clear();

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let err = world.resolver().resolve(&request).unwrap_err();

    match err {
        Error::ExternalProject { package, source } => {
            assert_eq!(package, "Net");
            assert!(matches!(*source, Error::ExternalProjectParse { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn prebuilt_package_must_not_contain_scripts() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Net", &[]);
    world.fs.dirs_with_scripts.insert(package_dir("Net"));

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let err = world.resolver().resolve(&request).unwrap_err();

    assert!(matches!(err, Error::PrebuiltProjectHasScripts { ref package } if package == "Net"));
}

#[test]
fn prebuilt_package_may_only_reference_prebuilt_packages() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Net", &["Core"]);
    world.package("Core");

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let err = world.resolver().resolve(&request).unwrap_err();

    match err {
        Error::PrebuiltDependencyNotPrebuilt { package, dependency } => {
            assert_eq!(package, "Net");
            assert_eq!(dependency, "Core");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn prebuilt_reference_filtered_by_platform_is_allowed() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Net", &["DroidNet"]);
    world.package("DroidNet").platforms = vec![Platform::Android];

    let request = world.request(Platform::Windows).with_plugins(&["Net"]);
    let schema = world.resolver().resolve(&request).unwrap();

    assert!(schema.package("DroidNet").is_none());
}

#[test]
fn declared_dependencies_of_prebuilt_packages_become_dedicated() {
    let mut world = Fixture::new();
    world.prebuilt("Net", "Net", &[]).dependencies = vec!["Helpers".into()];
    world.package_with_deps("Helpers", &["Base"]);
    world.package("Base");
    world.package("Unrelated");

    let request = world
        .request(Platform::Windows)
        .with_plugins(&["Net", "Unrelated"]);
    let schema = world.resolver().resolve(&request).unwrap();

    assert!(schema.package("Helpers").unwrap().wants_dedicated_project);
    assert!(schema.package("Base").unwrap().wants_dedicated_project);
    assert!(!schema.package("Unrelated").unwrap().wants_dedicated_project);

    let exposed: Vec<&str> = schema
        .promotions()
        .iter()
        .filter(|p| p.kind == PromotionKind::PrebuiltDependency)
        .map(|p| p.package.as_str())
        .collect();
    assert_eq!(exposed, vec!["Helpers", "Base"]);
}
