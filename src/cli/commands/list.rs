//! workshop-manager list - List installed workshops.

use clap::Args;
use console::style;

use crate::app::AppContext;
use crate::cli::commands::finish;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {}

pub fn run(ctx: &AppContext, _args: &ListArgs) -> Result<()> {
    let coordinator = ctx.coordinator()?;
    let rows = coordinator.list();

    finish(ctx, &rows, Vec::new(), |layout| {
        if rows.is_empty() {
            layout.push_line(style("No workshops installed").dim().to_string());
            layout.blank();
            layout.push_line("Install one with: workshop-manager install <dir>");
            return;
        }

        layout.push_line(format!(
            "{:24} {:12} {}",
            style("NAME").bold(),
            style("VERSION").bold(),
            style("DISPLAY NAME").bold()
        ));
        layout.push_line(style("─".repeat(60)).dim().to_string());
        for row in &rows {
            layout.push_line(format!(
                "{:24} {:12} {}",
                row.name, row.version, row.display_name
            ));
        }
    })
}
