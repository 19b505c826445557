use crate::commands::{CmdMessage, CmdResult, Mode};
use crate::document::Document;
use crate::error::Result;
use crate::heat::ValueIndex;
use crate::store::DocumentStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// Lists every value of `key` across `targets` along with the files carrying it.
pub fn run<S: DocumentStore>(store: &S, key: &str, targets: &[PathBuf]) -> Result<CmdResult> {
    let mut index = ValueIndex::new();
    let mut result = CmdResult::default().with_mode(Mode::Show);

    for path in targets {
        match Document::load(store, path) {
            Ok(doc) => {
                index.mark_document(&doc, key);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                result.add_message(CmdMessage::warning(format!(
                    "Skipped: {} ({})",
                    path.display(),
                    e
                )));
            }
        }
    }

    let report = index.into_report(key, targets.to_vec());
    info!(
        key,
        occurrences = report.occurrences,
        unique = report.unique,
        "values collected"
    );
    if report.occurrences == 0 {
        result.add_message(CmdMessage::info(format!("No file has the key \"{}\"", key)));
    }
    Ok(result.with_values(report))
}
