use crate::error::Result;
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files in `dir` (non-recursive) with one of `extensions`, sorted by path.
///
/// When `names` is non-empty, only files whose name matches one of them are kept.
/// A name may be given with or without its extension.
pub fn resolve<S: DocumentStore>(
    store: &S,
    dir: &Path,
    names: &[String],
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let mut targets: Vec<PathBuf> = store
        .list(dir)?
        .into_iter()
        .filter(|path| has_extension(path, extensions))
        .filter(|path| names.is_empty() || names.iter().any(|name| matches_name(path, name)))
        .collect();
    targets.sort();

    debug!(dir = %dir.display(), count = targets.len(), "resolved targets");
    Ok(targets)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

fn matches_name(path: &Path, name: &str) -> bool {
    let file_name = path.file_name().map(|n| n.to_string_lossy());
    let stem = path.file_stem().map(|n| n.to_string_lossy());
    file_name.as_deref() == Some(name) || stem.as_deref() == Some(name)
}
