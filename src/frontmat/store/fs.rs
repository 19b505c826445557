use super::DocumentStore;
use crate::error::{FrontmatError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

impl DocumentStore for FileStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| FrontmatError::file_access(path, e))
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        // Replace the file a symlink points at, not the link itself.
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

        let tmp_file = Self::tmp_path(&target);
        fs::write(&tmp_file, content).map_err(|e| FrontmatError::file_access(path, e))?;
        let replaced = match permissions {
            Some(permissions) => fs::set_permissions(&tmp_file, permissions),
            None => Ok(()),
        }
        .and_then(|()| fs::rename(&tmp_file, &target));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&tmp_file);
            return Err(FrontmatError::file_access(path, e));
        }
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(FrontmatError::Api(format!(
                "The path {} did not resolve to a directory",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| FrontmatError::file_access(dir, e))? {
            let path = entry.map_err(|e| FrontmatError::file_access(dir, e))?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}
