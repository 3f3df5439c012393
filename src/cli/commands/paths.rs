//! workshop-manager paths - Show resolved install locations.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::config::Config;
use crate::error::Result;
use crate::paths::{EnvSearchPath, SearchPath, search_path_contains};

#[derive(Args, Debug)]
pub struct PathsArgs {}

#[derive(Serialize)]
struct PathsReport {
    install_root: PathBuf,
    ledger: PathBuf,
    local_bin_dir: PathBuf,
    system_bin_dir: PathBuf,
    local_bin_on_path: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<PathBuf>,
    force: bool,
}

pub fn run(ctx: &AppContext, _args: &PathsArgs) -> Result<()> {
    let paths = &ctx.paths;
    let search_path = EnvSearchPath.search_path();
    let report = PathsReport {
        install_root: paths.install_root().to_path_buf(),
        ledger: paths.ledger_path(),
        local_bin_dir: paths.local_bin_dir(),
        system_bin_dir: paths.system_bin_dir().to_path_buf(),
        local_bin_on_path: search_path_contains(search_path.as_ref(), &paths.local_bin_dir()),
        config_file: ctx.config_path.clone().or_else(Config::global_path),
        force: ctx.config.link.force,
    };

    finish(ctx, &report, Vec::new(), |layout| {
        layout
            .kv("Install root", &report.install_root.display().to_string())
            .kv("Ledger", &report.ledger.display().to_string())
            .kv("Local bin", &report.local_bin_dir.display().to_string())
            .kv("System bin", &report.system_bin_dir.display().to_string())
            .kv(
                "Local on PATH",
                if report.local_bin_on_path { "yes" } else { "no" },
            )
            .kv("Force", if report.force { "yes" } else { "no" });
        if let Some(path) = &report.config_file {
            layout.kv("Config", &path.display().to_string());
        }
    })
}
