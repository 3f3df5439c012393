//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints that
//! name the workshop or path involved.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::WorkshopNotInstalled => suggest_not_installed(context),
        ErrorCode::LinkConflict => suggest_link_conflict(context),
        ErrorCode::LinkPermissionDenied => suggest_permission_denied(context),
        ErrorCode::LedgerCorrupted => suggest_ledger_corrupted(context),
        _ => code.suggestion().to_string(),
    }
}

/// Extend `underlying` for a workshop that is recorded but not linked.
pub fn suggest_relink(name: &str, underlying: &str) -> String {
    format!(
        "{underlying}. \"{name}\" is recorded as installed; run `workshop-manager link {name}` once that is fixed"
    )
}

fn context_str<'a>(context: Option<&'a Value>, key: &str) -> Option<&'a str> {
    context.and_then(|c| c.get(key)).and_then(Value::as_str)
}

fn suggest_not_installed(context: Option<&Value>) -> String {
    match context_str(context, "workshop") {
        Some(name) => format!(
            "Workshop '{name}' is not installed. Run `workshop-manager list` to see installed workshops"
        ),
        None => ErrorCode::WorkshopNotInstalled.suggestion().to_string(),
    }
}

fn suggest_link_conflict(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "File already exists at path \"{path}\". Try again using --force or manually remove the file"
        ),
        None => ErrorCode::LinkConflict.suggestion().to_string(),
    }
}

fn suggest_permission_denied(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "Failed to change \"{path}\". You may need to fix it manually with elevated privileges, e.g. `sudo rm {path}`"
        ),
        None => ErrorCode::LinkPermissionDenied.suggestion().to_string(),
    }
}

fn suggest_ledger_corrupted(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "The ledger at {path} could not be parsed. Fix the JSON by hand or move it aside and reinstall"
        ),
        None => ErrorCode::LedgerCorrupted.suggestion().to_string(),
    }
}
