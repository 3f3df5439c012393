//! workshop-manager info - Show an installed workshop and its link status.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::error::{Result, WmError};
use crate::linker::{LinkState, LinkStatus};
use crate::workshop::InstalledWorkshop;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Installed workshop name
    pub name: String,
}

#[derive(Serialize)]
struct InfoReport {
    #[serde(flatten)]
    workshop: InstalledWorkshop,
    store_binary: PathBuf,
    local_link: PathBuf,
    system_link: PathBuf,
    links: LinkStatus,
}

pub fn run(ctx: &AppContext, args: &InfoArgs) -> Result<()> {
    let coordinator = ctx.coordinator()?;
    let installed = coordinator
        .ledger()
        .get_by_name(&args.name)
        .map_err(|_| WmError::NotInstalled(args.name.clone()))?
        .clone();
    let links = coordinator.linker().link_status(&installed.as_workshop());
    let paths = coordinator.paths();

    let report = InfoReport {
        store_binary: paths.store_binary(&installed.name),
        local_link: paths.local_bin(&installed.name),
        system_link: paths.system_bin(&installed.name),
        workshop: installed,
        links,
    };

    finish(ctx, &report, Vec::new(), |layout| {
        let w = &report.workshop;
        layout.title(&w.display_name);
        if !w.description.is_empty() {
            layout.push_line(w.description.clone()).blank();
        }
        layout
            .kv("Name", &w.name)
            .kv("Version", &w.version)
            .kv("Source", &format!("{}/{}", w.owner, w.repo))
            .kv("Binary", &report.store_binary.display().to_string())
            .kv(
                "Local link",
                &describe_state(report.links.local, &report.local_link),
            )
            .kv(
                "System link",
                &describe_state(report.links.system, &report.system_link),
            )
            .kv(
                "On PATH",
                if report.links.on_search_path {
                    "yes (local bin dir)"
                } else {
                    "no (system link required)"
                },
            );
    })
}

fn describe_state(state: LinkState, path: &std::path::Path) -> String {
    let label = match state {
        LinkState::Linked => style("linked").green(),
        LinkState::Missing => style("missing").dim(),
        LinkState::Foreign => style("points elsewhere").yellow(),
        LinkState::Blocked => style("blocked by a file").red(),
    };
    format!("{label} {}", path.display())
}
