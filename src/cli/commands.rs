//! Command dispatch: builds hierarchies, runs operations, prints reports.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{demo, scan_directory, IoResultExt, Report, ScanOptions};
use crate::cli::args::{Cli, Commands, ConfigCommands, DemoCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_dir, global_config_path, Settings};
use crate::domain::{apply, Area, LeafCount, Node, Perimeter};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::Usage("no command given, see --help".into()))?;

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.no_tree {
        settings.tree_style = false;
    }
    debug!(?settings, "effective settings");

    match command {
        Commands::Demo { command } => match command {
            DemoCommands::Files => demo_files(&settings),
            DemoCommands::Shapes => demo_shapes(&settings),
        },
        Commands::Scan {
            dir,
            max_depth,
            hidden,
        } => {
            let options = ScanOptions {
                max_depth: *max_depth,
                include_hidden: *hidden,
            };
            scan(&settings, dir, &options)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_show(&settings),
            ConfigCommands::Path => config_path(cli.config.as_deref()),
            ConfigCommands::Init { force } => config_init(*force),
        },
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_hierarchy(settings: &Settings, title: &str, root: &Node) {
    let report = Report::new(settings);
    output::header(title);
    output::info(&Report::join(&report.structure(root)));
    if settings.tree_style {
        output::info("");
        output::info(report.tree(root).trim_end());
    }
    output::info("");
    output::action("Total", &report.total(root));
}

#[instrument(skip(settings))]
fn demo_files(settings: &Settings) -> CliResult<()> {
    let root = demo::file_system_sample()?;
    print_hierarchy(settings, "File System Structure", &root);
    Ok(())
}

#[instrument(skip(settings))]
fn demo_shapes(settings: &Settings) -> CliResult<()> {
    let shapes = demo::shapes_sample()?;
    let report = Report::new(settings);

    output::header("Calculating Areas");
    output::info(&Report::join(&report.measurements("area", &Area, &shapes)));
    output::header("Calculating Perimeters");
    output::info(&Report::join(&report.measurements(
        "perimeter",
        &Perimeter,
        &shapes,
    )));
    Ok(())
}

#[instrument(skip(settings))]
fn scan(settings: &Settings, dir: &Path, options: &ScanOptions) -> CliResult<()> {
    let root = scan_directory(dir, options)?;
    let leaves = apply(&LeafCount, &root);
    print_hierarchy(settings, &dir.display().to_string(), &root);
    output::action("Files", &leaves);
    Ok(())
}

fn config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn config_path(local: Option<&Path>) -> CliResult<()> {
    match global_config_path() {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not found)" };
            output::action("global", &format!("{}{}", path.display(), state));
        }
        None => output::warning("no home directory, global config disabled"),
    }
    if let Some(path) = local {
        output::action("local", &path.display());
    }
    Ok(())
}

#[instrument]
fn config_init(force: bool) -> CliResult<()> {
    let (dir, path) = match (global_config_dir(), global_config_path()) {
        (Some(dir), Some(path)) => (dir, path),
        _ => return Err(CliError::Usage("cannot determine config directory".into())),
    };
    if path.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "{} exists, use --force to overwrite",
            path.display()
        )));
    }
    std::fs::create_dir_all(&dir).with_path_context("create config dir", &dir)?;
    let content = Settings::default().to_toml()?;
    std::fs::write(&path, content).with_path_context("write config", &path)?;
    output::success(&format!("wrote {}", path.display()));
    Ok(())
}
