//! Structured outcomes emitted while installing and linking.
//!
//! The core never prints. It reports [`Event`]s to an [`EventSink`] and the
//! outer layer decides how (or whether) to render them.

use std::cell::RefCell;
use std::path::PathBuf;

use serde::Serialize;

/// Which of the two link locations an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkScope {
    Local,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A link was created at `link` pointing to `target`.
    Linked {
        workshop: String,
        scope: LinkScope,
        link: PathBuf,
        target: PathBuf,
    },
    /// An existing entry was removed from `path`.
    Removed {
        workshop: String,
        scope: LinkScope,
        path: PathBuf,
    },
    /// A non-link file occupies `path` and force was not given.
    Conflict {
        workshop: String,
        scope: LinkScope,
        path: PathBuf,
    },
    /// System linking was required but the system directory is not writable.
    ///
    /// The workshop is installed and linked locally. The operator can either
    /// add `local_bin_dir` to the search path or run `store_binary` directly.
    SystemUnwritable {
        workshop: String,
        system_dir: PathBuf,
        local_bin_dir: PathBuf,
        store_binary: PathBuf,
    },
    /// System link creation failed after the directory passed the write check.
    SystemLinkFailed {
        workshop: String,
        path: PathBuf,
        reason: String,
    },
    Installed {
        workshop: String,
        version: String,
    },
    Uninstalled {
        workshop: String,
        version: String,
    },
    Updated {
        workshop: String,
        from: String,
        to: String,
    },
}

impl Event {
    /// Advisories are non-fatal problems the operator should act on.
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::SystemUnwritable { .. } | Self::SystemLinkFailed { .. }
        )
    }
}

/// Receiver of structured outcomes.
pub trait EventSink {
    fn emit(&self, event: Event);
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: Event) {
        (**self).emit(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<Event>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<Event> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.is_advisory())
            .cloned()
            .collect()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}
