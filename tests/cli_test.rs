//! Integration tests for command dispatch.

use std::fs;

use clap::Parser;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use arbor::application::{demo, Report};
use arbor::cli::{execute_command, Cli, CliError};
use arbor::config::{global_config_path, Settings};
use arbor::exitcode;
use arbor::util::testing::{self, ConfigEnv};

struct Isolated {
    env: ConfigEnv,
    config_home: TempDir,
}

#[fixture]
fn isolated() -> Isolated {
    testing::init_test_setup();
    let config_home = TempDir::new().unwrap();
    let env = ConfigEnv::new(config_home.path());
    Isolated { env, config_home }
}

fn run(args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute_command(&cli)
}

// ============================================================
// Demo and scan
// ============================================================

#[rstest]
#[case::files(&["arbor", "demo", "files"])]
#[case::shapes(&["arbor", "demo", "shapes"])]
#[case::files_without_tree(&["arbor", "--no-tree", "demo", "files"])]
#[case::show_config(&["arbor", "config", "show"])]
#[case::show_paths(&["arbor", "config", "path"])]
fn given_command_when_executing_then_succeeds(
    #[from(isolated)] _isolated: Isolated,
    #[case] args: &[&str],
) {
    assert!(run(args).is_ok(), "{:?} failed", args);
}

#[rstest]
fn given_no_command_when_executing_then_usage_error(#[from(isolated)] _isolated: Isolated) {
    let err = run(&["arbor"]).unwrap_err();

    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
fn given_directory_when_scanning_then_succeeds(isolated: Isolated) {
    let dir = isolated.config_home.path().join("data");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("a.txt"), "abc").unwrap();

    let result = run(&["arbor", "scan", dir.to_str().unwrap(), "--max-depth", "1"]);

    assert!(result.is_ok());
}

#[rstest]
fn given_missing_directory_when_scanning_then_io_error(isolated: Isolated) {
    let absent = isolated.config_home.path().join("absent");

    let err = run(&["arbor", "scan", absent.to_str().unwrap()]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::IOERR);
}

#[rstest]
fn given_env_settings_when_rendering_demo_files_then_listing_uses_them(isolated: Isolated) {
    isolated.env.set("ARBOR_INDENT", "4");
    isolated.env.set("ARBOR_SIZE_UNIT", "B");
    let settings = Settings::load(None).unwrap();
    let root = demo::file_system_sample().unwrap();

    let report = Report::new(&settings);
    let lines = report.structure(&root);

    assert_eq!(lines[1], "    + Directory: documents");
    assert_eq!(lines[2], "        - File: report.pdf (1024B)");
    assert_eq!(report.total(&root), "Total size: 4992B");
}

#[rstest]
fn given_precision_when_rendering_demo_shapes_then_rounded(isolated: Isolated) {
    isolated.env.set("ARBOR_PRECISION", "3");
    let settings = Settings::load(None).unwrap();
    let shapes = demo::shapes_sample().unwrap();

    let lines = Report::new(&settings).measurements("area", &arbor::domain::Area, &shapes);

    assert_eq!(lines, vec!["Circle area: 78.540", "Rectangle area: 24.000"]);
}

// ============================================================
// Config errors
// ============================================================

#[rstest]
fn given_unparsable_env_value_when_executing_then_config_exit_code(isolated: Isolated) {
    isolated.env.set("ARBOR_PRECISION", "abc");

    let err = run(&["arbor", "demo", "files"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[rstest]
fn given_invalid_local_config_when_executing_then_config_exit_code(isolated: Isolated) {
    let local = isolated.config_home.path().join("local.toml");
    fs::write(&local, "indent = [").unwrap();

    let err = run(&["arbor", "--config", local.to_str().unwrap(), "demo", "shapes"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

// ============================================================
// config init
// ============================================================

#[rstest]
fn given_no_global_config_when_init_then_writes_defaults(#[from(isolated)] _isolated: Isolated) {
    let path = global_config_path().unwrap();
    assert!(!path.exists());

    run(&["arbor", "config", "init"]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        Settings::default().to_toml().unwrap()
    );
    assert_eq!(Settings::load(None).unwrap(), Settings::default());
}

#[rstest]
fn given_existing_global_config_when_init_without_force_then_refuses(
    #[from(isolated)] _isolated: Isolated,
) {
    let path = global_config_path().unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "precision = 7\n").unwrap();

    let err = run(&["arbor", "config", "init"]).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(fs::read_to_string(&path).unwrap(), "precision = 7\n");
}

#[rstest]
fn given_existing_global_config_when_init_with_force_then_overwrites(
    #[from(isolated)] _isolated: Isolated,
) {
    let path = global_config_path().unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "precision = 7\n").unwrap();

    run(&["arbor", "config", "init", "--force"]).unwrap();

    assert_eq!(Settings::load(None).unwrap().precision, 2);
}
