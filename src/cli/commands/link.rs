//! workshop-manager link - Recreate the links of an installed workshop.

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::cli::output::describe_link;
use crate::error::Result;
use crate::linker::LinkOutcome;

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Installed workshop name
    pub name: String,

    /// Replace regular files occupying link targets
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Serialize)]
struct LinkReport {
    workshop: String,
    link: LinkOutcome,
}

pub fn run(ctx: &AppContext, args: &LinkArgs) -> Result<()> {
    let coordinator = ctx.coordinator()?;
    let link = coordinator.relink(&args.name, ctx.force(args.force))?;
    let events = coordinator.linker().sink().take();

    let report = LinkReport {
        workshop: args.name.clone(),
        link,
    };
    finish(ctx, &report, events, |layout| {
        let label = if report.link.is_success() {
            style("Linked").green().bold()
        } else {
            style("Not linked").yellow().bold()
        };
        layout.push_line(format!(
            "{label} {}: {}",
            style(&report.workshop).cyan(),
            describe_link(&report.link)
        ));
    })
}
