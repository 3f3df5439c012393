//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use serde::Serialize;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::cli::output::{HumanLayout, advisory_lines, emit_human, emit_robot, robot_ok_with_events};
use crate::error::Result;
use crate::events::Event;

pub mod info;
pub mod install;
pub mod link;
pub mod list;
pub mod paths;
pub mod uninstall;
pub mod unlink;
pub mod update;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Install(args) => install::run(ctx, args),
        Commands::Uninstall(args) => uninstall::run(ctx, args),
        Commands::Update(args) => update::run(ctx, args),
        Commands::Link(args) => link::run(ctx, args),
        Commands::Unlink(args) => unlink::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Info(args) => info::run(ctx, args),
        Commands::Paths(args) => paths::run(ctx, args),
    }
}

/// Print a command result and the events it produced.
///
/// JSON mode wraps `data` in a response envelope. Human mode prints the
/// layout built by `human`, followed by any advisories.
pub(crate) fn finish<T: Serialize>(
    ctx: &AppContext,
    data: &T,
    events: Vec<Event>,
    human: impl FnOnce(&mut HumanLayout),
) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(&robot_ok_with_events(data, events));
    }

    let mut layout = HumanLayout::new();
    human(&mut layout);
    let advisories: Vec<String> = events.iter().flat_map(advisory_lines).collect();
    if !advisories.is_empty() {
        layout.blank().extend(advisories);
    }
    emit_human(layout);
    Ok(())
}
