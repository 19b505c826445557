use clap::{ArgAction, Parser, Subcommand};
use frontmat::api::Filter;
use frontmat::commands::Mode;
use frontmat::config::Verbosity;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "frontmat", bin_name = "frontmat", version)]
#[command(
    about = "Bulk edits of frontmatter blocks across a directory of markdown files",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the target files
    #[arg(short, long, global = true, default_value = ".", help_heading = "Options")]
    pub directory: PathBuf,

    /// Only edit files where KEY has exactly VALUE
    #[arg(
        short,
        long,
        global = true,
        value_name = "KEY:VALUE",
        value_parser = parse_filter,
        help_heading = "Options"
    )]
    pub filter: Option<Filter>,

    /// Report changes without writing any file
    #[arg(long, global = true, help_heading = "Options")]
    pub dry_run: bool,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// More output (-v lists values and per-file progress, -vv adds debug logs)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose", help_heading = "Options")]
    pub quiet: bool,
}

impl Cli {
    /// Verbosity requested on the command line, if any.
    pub fn verbosity(&self) -> Option<Verbosity> {
        match (self.quiet, self.verbose) {
            (true, _) => Some(Verbosity::Quiet),
            (false, 0) => None,
            (false, 1) => Some(Verbosity::Verbose),
            (false, _) => Some(Verbosity::Debug),
        }
    }
}

fn parse_filter(s: &str) -> Result<Filter, String> {
    s.parse().map_err(|e: frontmat::error::FrontmatError| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add KEY with VALUE to files that lack it
    #[command(display_order = 1)]
    Add {
        key: String,
        value: String,
        /// File names to edit (default: every file in the directory)
        targets: Vec<String>,
    },

    /// Set KEY to VALUE, adding it where missing
    #[command(display_order = 2)]
    Set {
        key: String,
        value: String,
        /// File names to edit (default: every file in the directory)
        targets: Vec<String>,
    },

    /// Change KEY to VALUE only in files that already have it
    #[command(display_order = 3)]
    Change {
        key: String,
        value: String,
        /// File names to edit (default: every file in the directory)
        targets: Vec<String>,
    },

    /// Remove KEY
    #[command(alias = "rm", display_order = 4)]
    Remove {
        key: String,
        /// File names to edit (default: every file in the directory)
        targets: Vec<String>,
    },

    /// Count every key and value
    #[command(display_order = 5)]
    Summarize {
        /// File names to read (default: every file in the directory)
        targets: Vec<String>,
    },

    /// List the values of KEY and the files carrying each
    #[command(display_order = 6)]
    Show {
        key: String,
        /// File names to read (default: every file in the directory)
        targets: Vec<String>,
    },

    /// Get or set configuration
    #[command(display_order = 7)]
    Config {
        /// Configuration key (dry-run, verbosity, extensions)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// A batch invocation, flattened out of the per-mode subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    pub mode: Mode,
    pub key: Option<String>,
    pub value: Option<String>,
    pub targets: Vec<String>,
}

/// What one invocation asks for, once the subcommand shape is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Batch(BatchArgs),
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

impl Commands {
    pub fn into_invocation(self) -> Invocation {
        let (mode, key, value, targets) = match self {
            Commands::Add {
                key,
                value,
                targets,
            } => (Mode::Add, Some(key), Some(value), targets),
            Commands::Set {
                key,
                value,
                targets,
            } => (Mode::Set, Some(key), Some(value), targets),
            Commands::Change {
                key,
                value,
                targets,
            } => (Mode::Change, Some(key), Some(value), targets),
            Commands::Remove { key, targets } => (Mode::Remove, Some(key), None, targets),
            Commands::Summarize { targets } => (Mode::Summarize, None, None, targets),
            Commands::Show { key, targets } => (Mode::Show, Some(key), None, targets),
            Commands::Config { key, value } => return Invocation::Config { key, value },
        };
        Invocation::Batch(BatchArgs {
            mode,
            key,
            value,
            targets,
        })
    }
}
