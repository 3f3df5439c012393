//! workshop-manager install - Install a workshop from a local source directory.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::cli::output::describe_link;
use crate::error::Result;
use crate::linker::LinkOutcome;
use crate::source::{ReleaseSource, StaticReleaseSource, read_descriptor};
use crate::workshop::Release;

/// Version recorded when `--version` is not given.
pub const LOCAL_VERSION: &str = "local";

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Workshop source directory containing workshop.json and bin/<name>
    pub source: PathBuf,

    /// Version to record for this install
    #[arg(long, default_value = LOCAL_VERSION)]
    pub version: String,

    /// Replace regular files occupying link targets
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Serialize)]
struct InstallReport {
    workshop: String,
    version: String,
    /// False when a file blocks the local link; the install is still recorded.
    linked: bool,
    link: LinkOutcome,
}

pub fn run(ctx: &AppContext, args: &InstallArgs) -> Result<()> {
    let workshop = read_descriptor(&args.source)?;
    let source = StaticReleaseSource::new(Release::new(
        args.version.as_str(),
        args.source.to_string_lossy(),
    ));
    let release = source.latest_release(&workshop)?;

    let mut coordinator = ctx.coordinator()?;
    let outcome = coordinator.install(&workshop, &release, ctx.force(args.force))?;
    let events = coordinator.linker().sink().take();

    let report = InstallReport {
        workshop: outcome.installed.name.clone(),
        version: outcome.installed.version.clone(),
        linked: outcome.link.is_success(),
        link: outcome.link,
    };
    finish(ctx, &report, events, |layout| {
        if report.linked {
            layout.push_line(format!(
                "{} {} {}",
                style("Installed").green().bold(),
                style(&report.workshop).cyan(),
                report.version
            ));
        } else {
            layout.push_line(format!(
                "{} {} {} {}",
                style("Installed").yellow().bold(),
                style(&report.workshop).cyan(),
                report.version,
                style("(not linked)").yellow().bold()
            ));
        }
        layout.kv("Linked", &describe_link(&report.link));
        if !report.linked {
            layout.kv("Next", &format!("workshop-manager link {} --force", report.workshop));
        }
    })
}
