//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Outline editor core: nested bullets with indent, collapse, zoom and keyboard navigation
#[derive(Parser, Debug)]
#[command(name = "flocky")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "FLOCKY_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key script against a fresh outline
    Replay {
        /// Script file (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        script: Option<PathBuf>,
        /// Print the JSON snapshot instead of the tree
        #[arg(long)]
        json: bool,
    },

    /// Render a JSON snapshot as a tree
    Show {
        /// Snapshot file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
        /// Zoom into this bullet id
        #[arg(short, long)]
        zoom: Option<u64>,
    },

    /// Validate a JSON snapshot
    Check {
        /// Snapshot file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
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
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a commented config template
    Template,
}
