//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Workshop Manager - install, update and link workshop executables
#[derive(Parser, Debug)]
#[command(name = "workshop-manager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/workshop-manager/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a workshop from a local source directory
    Install(commands::install::InstallArgs),

    /// Remove an installed workshop and its links
    Uninstall(commands::uninstall::UninstallArgs),

    /// Move an installed workshop to a new release
    Update(commands::update::UpdateArgs),

    /// Recreate the executable links of an installed workshop
    Link(commands::link::LinkArgs),

    /// Remove the executable links of an installed workshop
    Unlink(commands::unlink::UnlinkArgs),

    /// List installed workshops
    List(commands::list::ListArgs),

    /// Show details and link status of an installed workshop
    Info(commands::info::InfoArgs),

    /// Show resolved install locations
    Paths(commands::paths::PathsArgs),
}
