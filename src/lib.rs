pub mod app;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod ledger;
pub mod linker;
pub mod paths;
pub mod source;
pub mod utils;
pub mod workshop;

pub use error::{Result, WmError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
