// tests/config_test.rs
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tag_bump::config::{load_config, Config, LOCAL_CONFIG_FILE};
use tag_bump::git::Backend;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
namespace = "acme"
packages_root = "libs"
remote = "upstream"
backend = "git2"

[behavior]
strict = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.namespace, "acme");
    assert_eq!(config.packages_root, PathBuf::from("libs"));
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.backend, Backend::Git2);
    assert!(config.behavior.strict);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("Cannot read config file"));
}

#[test]
fn test_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"namespace = [unterminated").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path())).is_err());
}

#[test]
#[serial]
fn test_local_file_is_picked_up_from_current_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(LOCAL_CONFIG_FILE), "namespace = \"local\"\n").unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().namespace, "local");
}

#[test]
#[serial]
fn test_defaults_without_local_file() {
    let dir = TempDir::new().unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    // A user-level config may exist on the machine; only check it loads
    let config = result.expect("Should load config");
    if dirs::config_dir()
        .map(|d| !d.join(".tagbump.toml").exists())
        .unwrap_or(true)
    {
        assert_eq!(config, Config::default());
    }
}
