//! CLI argument definitions using clap's derive API.
//!
//! ## Commands
//!
//! - `check`: analyze component sources for class-usage issues
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory to analyze (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Generated CSS file to compile the class model from (overrides config)
    #[arg(long)]
    pub stylesheet: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check component sources for invalid, duplicate, conflicting, and
    /// extractable classes
    Check(CheckCommand),
    /// Initialize a new .twlintrc.json configuration file
    Init,
}
