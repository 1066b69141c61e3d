//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::Mode;

/// Detective mansion explorer: walk a binary map of rooms and collect clues in sorted order
#[derive(Parser, Debug)]
#[command(name = "mansion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the mansion (default)
    Explore {
        /// Map file (default: built-in mansion)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        map: Option<PathBuf>,

        /// Session flavour: investigate or explore
        #[arg(long)]
        mode: Option<Mode>,

        /// Do not name the rooms behind each passage
        #[arg(long)]
        hide_neighbors: bool,
    },

    /// Show the mansion map as a tree
    Map {
        /// Map file (default: built-in mansion)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        map: Option<PathBuf>,
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
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
