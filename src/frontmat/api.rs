//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! frontmat operation, whichever UI drives it.
//!
//! The facade:
//! - **Dispatches** a [`BatchRequest`] to the command for its mode
//! - **Validates inputs** the commands take for granted (a key for every mode but
//!   `summarize`, a value for add, set and change)
//! - **Merges configuration** into the request (a configured dry run wins)
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! `FrontmatApi<S: DocumentStore>` runs against `FileStore` in production and
//! `InMemoryStore` in tests.

use crate::commands::{self, BatchRequest, CmdResult, Mode};
use crate::config::FrontmatConfig;
use crate::error::Result;
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, Filter, MessageLevel};

pub struct FrontmatApi<S: DocumentStore> {
    store: S,
    config: FrontmatConfig,
}

impl<S: DocumentStore> FrontmatApi<S> {
    pub fn new(store: S, config: FrontmatConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &FrontmatConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one batch in the mode `request` names.
    pub fn run(&mut self, request: &BatchRequest) -> Result<CmdResult> {
        match request.mode.mutation() {
            Some(mutation) => {
                let key = request.require_key()?;
                let value = if mutation.takes_value() {
                    request.require_value()?
                } else {
                    ""
                };
                let edit = commands::edit::Edit {
                    mutation,
                    key,
                    value,
                    filter: request.filter.as_ref(),
                    dry_run: request.dry_run || self.config.dry_run,
                };
                commands::edit::run(&mut self.store, &edit, &request.targets)
            }
            None if request.mode == Mode::Show => {
                self.show(request.require_key()?, &request.targets)
            }
            None => self.summarize(&request.targets),
        }
    }

    pub fn summarize(&self, targets: &[PathBuf]) -> Result<CmdResult> {
        commands::summarize::run(&self.store, targets)
    }

    pub fn show(&self, key: &str, targets: &[PathBuf]) -> Result<CmdResult> {
        commands::show::run(&self.store, key, targets)
    }

    /// Markdown files under `dir`, optionally narrowed to `names`.
    pub fn resolve_targets(&self, dir: &Path, names: &[String]) -> Result<Vec<PathBuf>> {
        commands::targets::resolve(&self.store, dir, names, &self.config.extensions)
    }

    /// Reads or updates the persisted settings in `config_dir`.
    ///
    /// The running facade keeps the configuration it was built with.
    pub fn config_action(&self, config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(config_dir, action)
    }
}
