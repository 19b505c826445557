use crate::commands::{CmdMessage, CmdResult, Mode};
use crate::document::Document;
use crate::error::Result;
use crate::heat::HeatMap;
use crate::store::DocumentStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// Counts every `(key, value)` pair across `targets`.
pub fn run<S: DocumentStore>(store: &S, targets: &[PathBuf]) -> Result<CmdResult> {
    let mut heat = HeatMap::new();
    let mut result = CmdResult::default().with_mode(Mode::Summarize);

    for path in targets {
        match Document::load(store, path) {
            Ok(doc) => heat.mark_document(&doc),
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

    let summary = heat.into_summary(targets.to_vec());
    info!(
        files = targets.len(),
        keys = summary.keys.len(),
        total = summary.total,
        "summary compiled"
    );
    Ok(result.with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn aggregates_all_properties() {
        let store = InMemoryStore::new()
            .with_file("n/a.md", "---\nType: Task\nStatus: Done\n---\n")
            .with_file("n/b.md", "---\nType: Task\nStatus: Todo\n---\n")
            .with_file("n/c.md", "no block\n");
        let targets: Vec<PathBuf> = ["n/a.md", "n/b.md", "n/c.md"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let result = run(&store, &targets).unwrap();
        let summary = result.summary.unwrap();
        assert_eq!(summary.paths.len(), 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.unique_values, 3);

        let keys: Vec<_> = summary.keys.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(keys, ["Status", "Type"]);
        assert_eq!(summary.keys[1].values[0].frequency, 2);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn broken_files_become_warnings() {
        let store = InMemoryStore::new()
            .with_file("n/a.md", "---\nType: Task\n---\n")
            .with_file("n/bad.md", "---\na:b:c\n---\n");
        let targets = vec![PathBuf::from("n/bad.md"), PathBuf::from("n/a.md")];

        let result = run(&store, &targets).unwrap();
        assert_eq!(result.summary.unwrap().total, 1);
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("bad.md"));
    }

    #[test]
    fn empty_target_list_yields_zero_total() {
        let result = run(&InMemoryStore::new(), &[]).unwrap();
        let summary = result.summary.unwrap();
        assert_eq!(summary.total, 0);
        assert!(summary.keys.is_empty());
    }
}
