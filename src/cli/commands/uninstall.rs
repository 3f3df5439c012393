//! workshop-manager uninstall - Remove an installed workshop.

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Workshop name
    pub name: String,

    /// Remove regular files occupying link targets
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Serialize)]
struct UninstallReport {
    workshop: String,
    version: String,
}

pub fn run(ctx: &AppContext, args: &UninstallArgs) -> Result<()> {
    let mut coordinator = ctx.coordinator()?;
    let removed = coordinator.uninstall(&args.name, ctx.force(args.force))?;
    let events = coordinator.linker().sink().take();

    let report = UninstallReport {
        workshop: removed.name,
        version: removed.version,
    };
    finish(ctx, &report, events, |layout| {
        layout.push_line(format!(
            "{} {} {}",
            style("Uninstalled").green().bold(),
            style(&report.workshop).cyan(),
            report.version
        ));
    })
}
