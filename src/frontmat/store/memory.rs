use super::DocumentStore;
use crate::error::{FrontmatError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage for testing.
///
/// Directories exist implicitly: inserting `notes/a.md` makes `notes` listable.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    simulate_write_error: bool,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.dirs.insert(parent.to_path_buf());
        }
        self.files.insert(path, content.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Make every subsequent write fail.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            FrontmatError::file_access(path, io::Error::from(io::ErrorKind::NotFound))
        })
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(FrontmatError::file_access(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        self.insert(path, content);
        self.writes += 1;
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.dirs.contains(dir) {
            return Err(FrontmatError::Api(format!(
                "The path {} did not resolve to a directory",
                dir.display()
            )));
        }
        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }
}
