//! workshop-manager update - Move an installed workshop to a new release.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::cli::output::describe_link;
use crate::coordinator::UpdateOutcome;
use crate::error::{Result, WmError};
use crate::linker::LinkOutcome;
use crate::source::read_descriptor;
use crate::workshop::Release;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Installed workshop name
    pub name: String,

    /// Source directory of the new release
    pub source: PathBuf,

    /// Version of the new release
    #[arg(long)]
    pub version: String,

    /// Replace regular files occupying link targets
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Serialize)]
struct UpdateReport {
    workshop: String,
    updated: bool,
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<LinkOutcome>,
}

pub fn run(ctx: &AppContext, args: &UpdateArgs) -> Result<()> {
    let descriptor = read_descriptor(&args.source)?;
    if descriptor.name != args.name {
        return Err(WmError::InvalidWorkshop(format!(
            "{} describes workshop \"{}\", not \"{}\"",
            args.source.display(),
            descriptor.name,
            args.name
        )));
    }

    let release = Release::new(args.version.as_str(), args.source.to_string_lossy());
    let mut coordinator = ctx.coordinator()?;
    let outcome = coordinator.update(&args.name, &release, ctx.force(args.force))?;
    let events = coordinator.linker().sink().take();

    let report = match outcome {
        UpdateOutcome::UpToDate { version } => UpdateReport {
            workshop: args.name.clone(),
            updated: false,
            from: version.clone(),
            to: version,
            link: None,
        },
        UpdateOutcome::Updated { from, to, link } => UpdateReport {
            workshop: args.name.clone(),
            updated: true,
            from,
            to,
            link: Some(link),
        },
    };

    finish(ctx, &report, events, |layout| {
        if report.updated {
            layout.push_line(format!(
                "{} {} {} -> {}",
                style("Updated").green().bold(),
                style(&report.workshop).cyan(),
                report.from,
                report.to
            ));
        } else {
            layout.push_line(format!(
                "{} is already at {}",
                style(&report.workshop).cyan(),
                report.to
            ));
        }
        if let Some(link) = &report.link {
            layout.kv("Linked", &describe_link(link));
        }
    })
}
