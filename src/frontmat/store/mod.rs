//! # Storage Layer
//!
//! Documents are plain text files, but the core never touches `std::fs` directly. It
//! goes through the [`DocumentStore`] trait so batch logic can be exercised without a
//! filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage. Writes go to a temporary sibling file
//!   that is then renamed over the target, so a crash never leaves a half-written
//!   note behind.
//! - [`memory::InMemoryStore`]: Path-keyed map for tests, with switchable write
//!   failures to exercise per-file error reporting.
//!
//! Every method works on whole files. Line splitting and block handling live in
//! [`crate::document`].

use crate::error::Result;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

/// Whole-file text access for documents.
pub trait DocumentStore {
    /// Read the full text of a file.
    fn read(&self, path: &Path) -> Result<String>;

    /// Replace the full text of a file.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;

    /// List the regular files directly inside `dir` (not recursive).
    ///
    /// Fails if `dir` is not a directory.
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}
