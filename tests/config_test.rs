//! Integration tests for Settings config loading.
//!
//! Every test holds a `ConfigEnv`, which serializes access to the process
//! environment and points the global config directory at a temp dir.

use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use arbor::application::ApplicationError;
use arbor::config::{global_config_path, Settings};
use arbor::util::testing::ConfigEnv;

struct Isolated {
    // Dropped first: env is reset before the temp dir goes away
    env: ConfigEnv,
    config_home: TempDir,
}

impl Isolated {
    fn write_global(&self, content: &str) -> PathBuf {
        let dir = self.config_home.path().join("arbor");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("arbor.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn write_local(&self, content: &str) -> PathBuf {
        let path = self.config_home.path().join("local.toml");
        fs::write(&path, content).unwrap();
        path
    }
}

#[fixture]
fn isolated() -> Isolated {
    let config_home = TempDir::new().unwrap();
    let env = ConfigEnv::new(config_home.path());
    Isolated { env, config_home }
}

// ============================================================
// File layers
// ============================================================

#[rstest]
fn given_no_config_files_when_load_then_defaults(#[from(isolated)] _isolated: Isolated) {
    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[rstest]
fn given_local_config_when_load_then_overrides_specified_fields(isolated: Isolated) {
    let path = isolated.write_local("precision = 4\nsize_unit = \"MB\"\n");

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.precision, 4);
    assert_eq!(settings.size_unit, "MB");
    assert_eq!(settings.indent, 2);
}

#[rstest]
fn given_xdg_config_home_when_resolving_then_global_path_is_inside(isolated: Isolated) {
    let path = global_config_path().expect("global config path");

    assert_eq!(
        path,
        isolated.config_home.path().join("arbor").join("arbor.toml")
    );
}

#[rstest]
fn given_global_config_when_load_then_applied_over_defaults(isolated: Isolated) {
    isolated.write_global("indent = 6\ntree_style = false\n");

    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings.indent, 6);
    assert!(!settings.tree_style);
    assert_eq!(settings.size_unit, "KB");
}

#[rstest]
fn given_global_and_local_config_when_load_then_local_wins(isolated: Isolated) {
    isolated.write_global("indent = 6\nprecision = 1\n");
    let local = isolated.write_local("precision = 3\n");

    let settings = Settings::load(Some(&local)).expect("load settings");

    assert_eq!(settings.indent, 6);
    assert_eq!(settings.precision, 3);
}

#[rstest]
fn given_invalid_global_config_when_load_then_config_error(isolated: Isolated) {
    isolated.write_global("indent = \"wide\"");

    let result = Settings::load(None);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[rstest]
fn given_invalid_toml_when_load_then_config_error(isolated: Isolated) {
    let path = isolated.write_local("precision = \"many\"");

    let result = Settings::load(Some(&path));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("parse")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[rstest]
fn given_missing_local_file_when_load_then_config_error(isolated: Isolated) {
    let absent = isolated.config_home.path().join("absent.toml");

    let result = Settings::load(Some(&absent));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

// ============================================================
// Environment layer
// ============================================================

#[rstest]
fn given_env_override_when_load_then_wins_over_files(isolated: Isolated) {
    isolated.write_global("precision = 1\nsize_unit = \"B\"\n");
    let local = isolated.write_local("precision = 3\n");
    isolated.env.set("ARBOR_PRECISION", "5");
    isolated.env.set("ARBOR_TREE_STYLE", "false");

    let settings = Settings::load(Some(&local)).expect("load settings");

    assert_eq!(settings.precision, 5);
    assert!(!settings.tree_style);
    assert_eq!(settings.size_unit, "B");
}

#[rstest]
fn given_env_string_override_when_load_then_replaces_unit(isolated: Isolated) {
    isolated.env.set("ARBOR_SIZE_UNIT", "MB");

    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings.size_unit, "MB");
}

#[rstest]
#[case("ARBOR_PRECISION", "abc")]
#[case("ARBOR_INDENT", "wide")]
#[case("ARBOR_TREE_STYLE", "sometimes")]
fn given_unparsable_env_value_when_load_then_config_error(
    isolated: Isolated,
    #[case] key: &str,
    #[case] value: &str,
) {
    isolated.env.set(key, value);

    let result = Settings::load(None);

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains(key)),
        other => panic!("expected config error for {}, got {:?}", key, other),
    }
}

#[test]
fn given_default_settings_when_serialized_then_contains_all_fields() {
    let text = Settings::default().to_toml().unwrap();

    for key in ["indent", "size_unit", "precision", "tree_style"] {
        assert!(text.contains(key), "missing {} in {}", key, text);
    }
}
