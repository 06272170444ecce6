//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Part-whole hierarchies with aggregation and per-kind operations
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Additional config file, applied over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "ARBOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the boxed tree view
    #[arg(long, global = true)]
    pub no_tree: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a built-in sample hierarchy
    Demo {
        #[command(subcommand)]
        command: DemoCommands,
    },

    /// Build a size hierarchy from a directory
    Scan {
        /// Directory to scan
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Maximum depth below DIR
        #[arg(long)]
        max_depth: Option<usize>,
        /// Include dot files and directories
        #[arg(long)]
        hidden: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum DemoCommands {
    /// File system sample: listing, tree and total size
    Files,

    /// Shapes sample: areas and perimeters
    Shapes,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Write default config to the global config path
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::parse_from(["arbor", "-dd", "scan", "/tmp", "--max-depth", "2"]);
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Scan { dir, max_depth, hidden }) => {
                assert_eq!(dir, PathBuf::from("/tmp"));
                assert_eq!(max_depth, Some(2));
                assert!(!hidden);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
