//! # Command Layer
//!
//! Batch logic for each mode. Commands take a [`DocumentStore`](crate::store::DocumentStore)
//! and plain arguments and return a [`CmdResult`]; they never print.
//!
//! A batch never aborts because one file misbehaves. Load, parse and write failures
//! are recorded against that file and the loop moves on.

use crate::config::FrontmatConfig;
use crate::document::{file_label, Document};
use crate::error::{FrontmatError, Result};
use crate::heat::{Summary, ValueReport};
use crate::mutation::Mutation;
use crate::property::SEPARATOR;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub mod config;
pub mod edit;
pub mod show;
pub mod summarize;
pub mod targets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Add,
    Set,
    Change,
    Remove,
    Summarize,
    Show,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Add,
        Mode::Set,
        Mode::Change,
        Mode::Remove,
        Mode::Summarize,
        Mode::Show,
    ];

    /// The document mutation behind an editing mode.
    pub fn mutation(self) -> Option<Mutation> {
        match self {
            Mode::Add => Some(Mutation::Add),
            Mode::Set => Some(Mutation::Set),
            Mode::Change => Some(Mutation::Change),
            Mode::Remove => Some(Mutation::Remove),
            Mode::Summarize | Mode::Show => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Set => "set",
            Mode::Change => "change",
            Mode::Remove => "remove",
            Mode::Summarize => "summarize",
            Mode::Show => "show",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = FrontmatError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| FrontmatError::Api(format!("Unknown mode: {}", s)))
    }
}

/// Restricts editing modes to documents where `key` has exactly `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub key: String,
    pub value: String,
}

impl Filter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        doc.get(&self.key) == Some(self.value.as_str())
    }
}

impl FromStr for Filter {
    type Err = FrontmatError;

    fn from_str(s: &str) -> Result<Self> {
        let mut pieces = s.split(SEPARATOR);
        match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(key), Some(value), None) if !key.trim().is_empty() => {
                Ok(Filter::new(key.trim(), value.trim()))
            }
            _ => Err(FrontmatError::Api(format!(
                "Invalid filter '{}': expected key:value",
                s
            ))),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, SEPARATOR, self.value)
    }
}

/// Everything one invocation asks of the core, however it was collected.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub mode: Mode,
    pub key: Option<String>,
    pub value: Option<String>,
    pub filter: Option<Filter>,
    pub targets: Vec<PathBuf>,
    pub dry_run: bool,
}

impl BatchRequest {
    pub fn new(mode: Mode, targets: Vec<PathBuf>) -> Self {
        Self {
            mode,
            key: None,
            value: None,
            filter: None,
            targets,
            dry_run: false,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The key, which every mode but `summarize` needs.
    pub fn require_key(&self) -> Result<&str> {
        self.key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FrontmatError::Api(format!("Mode '{}' requires a key", self.mode)))
    }

    /// The value, which add, set and change need.
    pub fn require_value(&self) -> Result<&str> {
        self.value
            .as_deref()
            .ok_or_else(|| FrontmatError::Api(format!("Mode '{}' requires a value", self.mode)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What happened to a file after its mutation was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    /// Dry run: the change was computed but not persisted.
    Discarded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Set,
    Removed,
    Skipped,
}

/// Before/after record for one target of an editing batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: String,
    pub path: PathBuf,
    pub previous: Option<String>,
    pub current: Option<String>,
    pub filter_pass: bool,
    pub changed: bool,
    pub status: FileStatus,
}

impl FileReport {
    pub fn failed(path: PathBuf, error: &FrontmatError) -> Self {
        Self {
            name: file_label(&path),
            path,
            previous: None,
            current: None,
            filter_pass: false,
            changed: false,
            status: FileStatus::Failed(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }

    /// Classifies the effect on this file's value.
    pub fn change(&self) -> ChangeKind {
        match (&self.previous, &self.current) {
            (previous, current) if previous == current => ChangeKind::Skipped,
            (None, _) => ChangeKind::Added,
            (_, None) => ChangeKind::Removed,
            _ => ChangeKind::Set,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeTotals {
    pub total: usize,
    pub added: usize,
    pub set: usize,
    pub removed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ChangeTotals {
    pub fn tally(files: &[FileReport]) -> Self {
        let mut totals = ChangeTotals {
            total: files.len(),
            ..Default::default()
        };
        for file in files {
            if file.is_failed() {
                totals.failed += 1;
                continue;
            }
            match file.change() {
                ChangeKind::Added => totals.added += 1,
                ChangeKind::Set => totals.set += 1,
                ChangeKind::Removed => totals.removed += 1,
                ChangeKind::Skipped => totals.skipped += 1,
            }
        }
        totals
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditReport {
    pub files: Vec<FileReport>,
    pub totals: ChangeTotals,
}

impl EditReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let totals = ChangeTotals::tally(&files);
        Self { files, totals }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<ValueReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<FrontmatConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_edit(mut self, edit: EditReport) -> Self {
        self.edit = Some(edit);
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_values(mut self, values: ValueReport) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_config(mut self, config: FrontmatConfig) -> Self {
        self.config = Some(config);
        self
    }
}
