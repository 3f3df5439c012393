use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{ErrorCode, Result, StructuredError, WmError};
use crate::events::{Event, LinkScope};
use crate::linker::{LinkOutcome, SystemLink};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable formatted output with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, Self::Human)
    }

    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    #[serde(rename = "error")]
    StructuredError {
        /// Error code enum value (e.g., "LINK_CONFLICT")
        code: ErrorCode,
        /// Numeric error code (e.g., 401)
        numeric_code: u16,
        message: String,
        suggestion: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<serde_json::Value>,
        recoverable: bool,
        category: String,
    },
}

impl From<StructuredError> for RobotStatus {
    fn from(err: StructuredError) -> Self {
        Self::StructuredError {
            code: err.code,
            numeric_code: err.numeric_code,
            message: err.message,
            suggestion: err.suggestion,
            context: err.context,
            recoverable: err.recoverable,
            category: err.category,
        }
    }
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: crate::VERSION.to_string(),
        data,
        events: Vec::new(),
        warnings: Vec::new(),
    }
}

/// Success response carrying the events a command produced.
///
/// Every advisory also becomes a one-line warning.
pub fn robot_ok_with_events<T: Serialize>(data: T, events: Vec<Event>) -> RobotResponse<T> {
    let warnings = events.iter().filter_map(advisory_summary).collect();
    RobotResponse {
        events,
        warnings,
        ..robot_ok(data)
    }
}

/// Error response with code, suggestion and context.
pub fn robot_error_structured(err: &WmError) -> RobotResponse<serde_json::Value> {
    RobotResponse {
        status: err.to_structured().into(),
        timestamp: Utc::now(),
        version: crate::VERSION.to_string(),
        data: serde_json::Value::Null,
        events: Vec::new(),
        warnings: Vec::new(),
    }
}

pub fn emit_robot<T: Serialize>(response: &RobotResponse<T>) -> Result<()> {
    emit_json(response)
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 16,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines.push(format!("{} {value}", style(padded).dim()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) -> &mut Self {
        self.lines.extend(lines);
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

/// One-line description of an advisory event; `None` for other events.
#[must_use]
pub fn advisory_summary(event: &Event) -> Option<String> {
    match event {
        Event::Conflict {
            workshop,
            scope,
            path,
        } => Some(format!(
            "{} link for \"{workshop}\" not created: \"{}\" exists and is not a link (use --force)",
            scope_label(*scope),
            path.display()
        )),
        Event::SystemUnwritable {
            workshop,
            system_dir,
            ..
        } => Some(format!(
            "system directory \"{}\" is not writable; \"{workshop}\" is installed but not on PATH",
            system_dir.display()
        )),
        Event::SystemLinkFailed {
            workshop,
            path,
            reason,
        } => Some(format!(
            "system link for \"{workshop}\" at \"{}\" failed: {reason}",
            path.display()
        )),
        _ => None,
    }
}

/// Full human rendering of an advisory, including remediation steps.
#[must_use]
pub fn advisory_lines(event: &Event) -> Vec<String> {
    match event {
        Event::SystemUnwritable {
            workshop,
            system_dir,
            local_bin_dir,
            store_binary,
        } => {
            let local = local_bin_dir.display();
            vec![
                format!(
                    " {}",
                    style(format!(
                        "The system directory \"{}\" is not writable.",
                        system_dir.display()
                    ))
                    .red()
                    .bold()
                ),
                format!(
                    " {}",
                    style(format!(
                        "Workshop \"{workshop}\" is installed but not linked to an executable path."
                    ))
                    .green()
                ),
                String::new(),
                " You have two options now:".to_string(),
                format!(
                    "  1. Add the local bin dir {} to your PATH variable",
                    style(&local).cyan()
                ),
                format!(
                    "      e.g. run {}",
                    style(format!(
                        "echo 'export PATH=\"$PATH:{local}\"' >> ~/.bashrc && source ~/.bashrc"
                    ))
                    .cyan()
                ),
                "      replacing ~/.bashrc with your shell config file, e.g. ~/.zshrc or ~/.profile"
                    .to_string(),
                format!(
                    "  2. Run {} directly with {}",
                    style(workshop).cyan(),
                    style(store_binary.display()).cyan()
                ),
            ]
        }
        other => advisory_summary(other)
            .map(|line| vec![format!(" {} {line}", style("warning:").yellow().bold())])
            .unwrap_or_default(),
    }
}

/// Short human description of a link outcome.
#[must_use]
pub fn describe_link(outcome: &LinkOutcome) -> String {
    match outcome {
        LinkOutcome::Conflict { path } => format!("not linked ({} is in the way)", path.display()),
        LinkOutcome::Linked { local, system } => match system {
            SystemLink::NotRequired => local.display().to_string(),
            SystemLink::Linked { path } => format!("{} and {}", local.display(), path.display()),
            SystemLink::SkippedUnwritable { .. }
            | SystemLink::SkippedConflict { .. }
            | SystemLink::Failed { .. } => {
                format!("{} (local only)", local.display())
            }
        },
    }
}

const fn scope_label(scope: LinkScope) -> &'static str {
    match scope {
        LinkScope::Local => "local",
        LinkScope::System => "system",
    }
}
