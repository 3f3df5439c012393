//! Per-invocation application state shared by every command.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::events::RecordingSink;
use crate::ledger::Ledger;
use crate::linker::Linker;
use crate::paths::{EnvSearchPath, PathResolver};
use crate::source::DirectoryMaterializer;

/// Coordinator wired for CLI use: real `PATH`, events kept for rendering.
pub type CliCoordinator = Coordinator<EnvSearchPath, RecordingSink>;

pub struct AppContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub paths: PathResolver,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let paths = config.resolver()?;
        debug!(
            install_root = %paths.install_root().display(),
            system_bin_dir = %paths.system_bin_dir().display(),
            "resolved paths"
        );

        Ok(Self {
            config,
            config_path: cli.config.clone(),
            paths,
            robot_mode: cli.output_format().is_machine_readable(),
        })
    }

    /// Effective force flag: the command's `--force` or `link.force` from config.
    #[must_use]
    pub const fn force(&self, flag: bool) -> bool {
        flag || self.config.link.force
    }

    /// Load the ledger and assemble a coordinator over it.
    pub fn coordinator(&self) -> Result<CliCoordinator> {
        let ledger = Ledger::load(self.paths.ledger_path())?;
        let linker = Linker::new(self.paths.clone(), EnvSearchPath, RecordingSink::new());
        Ok(Coordinator::new(
            ledger,
            linker,
            Box::new(DirectoryMaterializer),
        ))
    }
}
