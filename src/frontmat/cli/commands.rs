//! # CLI Layer
//!
//! One client of the frontmat library, and the only code that knows about the
//! terminal: argument parsing, logging setup, printing and exit codes.
//!
//! - `run()`: parse, configure, dispatch (called by `main.rs`)
//! - `init_context()`: loads settings, applies flag overrides, builds the API
//! - `handle_*()`: call the API and hand the `CmdResult` to `print`

use super::print::{print_messages, render_config, render_edit, render_summary, render_values};
use super::setup::{BatchArgs, Cli, Invocation};
use clap::Parser;
use directories::ProjectDirs;
use frontmat::api::{ConfigAction, FrontmatApi};
use frontmat::commands::{BatchRequest, CmdResult};
use frontmat::config::{FrontmatConfig, Verbosity};
use frontmat::error::{FrontmatError, Result};
use frontmat::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the settings directory (used by tests).
const CONFIG_DIR_ENV: &str = "FRONTMAT_CONFIG_DIR";
/// `tracing` filter directives; wins over the configured verbosity.
const LOG_ENV: &str = "FRONTMAT_LOG";

struct AppContext {
    api: FrontmatApi<FileStore>,
    config_dir: PathBuf,
    verbosity: Verbosity,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;
    init_logging(ctx.verbosity);

    let Cli {
        command,
        directory,
        filter,
        dry_run,
        ..
    } = cli;

    match command.into_invocation() {
        Invocation::Batch(batch) => handle_batch(ctx, batch, directory, filter, dry_run),
        Invocation::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "frontmat", "frontmat")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FrontmatError::Config("Could not determine config dir".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let mut config = FrontmatConfig::load(&config_dir)?;
    // --dry-run travels on the request; the API ORs it with the setting.
    if let Some(verbosity) = cli.verbosity() {
        config.verbosity = verbosity;
    }

    Ok(AppContext {
        verbosity: config.verbosity,
        api: FrontmatApi::new(FileStore::new(), config),
        config_dir,
        json: cli.json,
    })
}

fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    // A second init (tests driving `run` twice) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_batch(
    mut ctx: AppContext,
    batch: BatchArgs,
    directory: PathBuf,
    filter: Option<frontmat::api::Filter>,
    dry_run: bool,
) -> Result<()> {
    let targets = ctx.api.resolve_targets(&directory, &batch.targets)?;
    if targets.is_empty() {
        return Err(FrontmatError::Api(format!(
            "No target files found in {}",
            directory.display()
        )));
    }

    let mut request = BatchRequest::new(batch.mode, targets).with_dry_run(dry_run);
    if let Some(key) = batch.key {
        request = request.with_key(key);
    }
    if let Some(value) = batch.value {
        request = request.with_value(value);
    }
    if let Some(filter) = filter {
        request = request.with_filter(filter);
    }

    let result = ctx.api.run(&request)?;
    print_result(&ctx, &result)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config_action(&ctx.config_dir, action)?;
    print_result(ctx, &result)
}

fn print_result(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let quiet = ctx.verbosity == Verbosity::Quiet;
    let verbose = ctx.verbosity >= Verbosity::Verbose;
    if !quiet {
        if let Some(edit) = &result.edit {
            print!("{}", render_edit(edit, verbose));
        }
        if let Some(summary) = &result.summary {
            print!("{}", render_summary(summary, verbose));
        }
        if let Some(values) = &result.values {
            print!("{}", render_values(values));
        }
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages, ctx.verbosity);
    Ok(())
}
