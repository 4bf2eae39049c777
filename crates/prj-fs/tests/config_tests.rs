use prj_fs::{ConfigStore, Error, NormalizedPath};
use serde_yaml::Value;
use std::fs;
use tempfile::TempDir;

fn write(temp: &TempDir, name: &str, content: &str) -> NormalizedPath {
    let file_path = temp.path().join(name);
    fs::write(&file_path, content).unwrap();
    NormalizedPath::new(&file_path)
}

#[test]
fn test_load_yaml_document() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "ProjenyProject.yaml", "PluginsFolder:\n  - Core\n  - Utils\n");

    let doc: Value = ConfigStore::new().load(&path).unwrap();
    let plugins = doc["PluginsFolder"].as_sequence().unwrap();
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0].as_str(), Some("Core"));
}

#[test]
fn test_load_json_document_into_yaml_tree() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "ProjenyPackage.json", r#"{"ForcePluginsDirectory": true}"#);

    let doc: Value = ConfigStore::new().load(&path).unwrap();
    assert_eq!(doc["ForcePluginsDirectory"].as_bool(), Some(true));
}

#[test]
fn test_load_toml_document_into_yaml_tree() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "ProjenyPackage.toml", "Dependencies = [\"Core\"]\n");

    let doc: Value = ConfigStore::new().load(&path).unwrap();
    assert_eq!(doc["Dependencies"][0].as_str(), Some("Core"));
}

#[test]
fn test_empty_yaml_is_null() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "ProjenyPackage.yaml", "");

    let doc: Value = ConfigStore::new().load(&path).unwrap();
    assert!(doc.is_null());
}

#[test]
fn test_invalid_yaml_reports_format_and_path() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "broken.yaml", "PluginsFolder: [Core\n");

    let err = ConfigStore::new().load::<Value>(&path).unwrap_err();
    match err {
        Error::ConfigParse { path, format, .. } => {
            assert_eq!(format, "YAML");
            assert!(path.to_string_lossy().ends_with("broken.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_extension_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "ProjenyPackage.ini", "x=1");

    let err = ConfigStore::new().load::<Value>(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { extension } if extension == "ini"));
}
