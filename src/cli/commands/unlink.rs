//! workshop-manager unlink - Remove the links of an installed workshop.

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct UnlinkArgs {
    /// Installed workshop name
    pub name: String,

    /// Remove regular files occupying link targets
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Serialize)]
struct UnlinkReport {
    workshop: String,
    unlinked: bool,
}

pub fn run(ctx: &AppContext, args: &UnlinkArgs) -> Result<()> {
    let coordinator = ctx.coordinator()?;
    coordinator.unlink(&args.name, ctx.force(args.force))?;
    let events = coordinator.linker().sink().take();

    let report = UnlinkReport {
        workshop: args.name.clone(),
        unlinked: true,
    };
    finish(ctx, &report, events, |layout| {
        layout.push_line(format!(
            "{} {}",
            style("Unlinked").green().bold(),
            style(&report.workshop).cyan()
        ));
    })
}
