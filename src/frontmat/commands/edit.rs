use crate::commands::{CmdMessage, CmdResult, EditReport, FileReport, FileStatus, Filter, Mode};
use crate::document::Document;
use crate::error::Result;
use crate::mutation::Mutation;
use crate::property::Property;
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One editing pass, shared by every file of the batch.
#[derive(Debug, Clone)]
pub struct Edit<'a> {
    pub mutation: Mutation,
    pub key: &'a str,
    pub value: &'a str,
    pub filter: Option<&'a Filter>,
    pub dry_run: bool,
}

pub fn run<S: DocumentStore>(store: &mut S, edit: &Edit, targets: &[PathBuf]) -> Result<CmdResult> {
    // A bad key or value would fail identically for every file; reject it once.
    let value = if edit.mutation.takes_value() {
        edit.value
    } else {
        ""
    };
    let property = Property::new(edit.key, value)?;

    let files: Vec<FileReport> = targets
        .iter()
        .map(|path| {
            edit_file(&mut *store, edit, &property, path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "skipping file");
                FileReport::failed(path.clone(), &e)
            })
        })
        .collect();

    let report = EditReport::new(files);
    let totals = report.totals;
    info!(
        mode = %edit.mutation,
        total = totals.total,
        added = totals.added,
        set = totals.set,
        removed = totals.removed,
        skipped = totals.skipped,
        failed = totals.failed,
        dry_run = edit.dry_run,
        "batch finished"
    );

    let mut result = CmdResult::default().with_mode(mode_of(edit.mutation));
    for file in report.files.iter() {
        if let FileStatus::Failed(reason) = &file.status {
            result.add_message(CmdMessage::warning(format!(
                "Failed: {} ({})",
                file.path.display(),
                reason
            )));
        }
    }
    if edit.dry_run {
        result.add_message(CmdMessage::info("Dry run: no files were written."));
    }
    Ok(result.with_edit(report))
}

fn edit_file<S: DocumentStore>(
    store: &mut S,
    edit: &Edit,
    property: &Property,
    path: &Path,
) -> Result<FileReport> {
    let mut doc = Document::load(store, path)?;

    let previous = doc.get(property.key()).map(str::to_string);
    let filter_pass = edit.filter.map_or(true, |f| f.matches(&doc));
    let changed = filter_pass && edit.mutation.apply(&mut doc, property);
    let current = doc.get(property.key()).map(str::to_string);

    debug!(
        mode = %edit.mutation,
        path = %path.display(),
        filter_pass,
        changed,
        "processed file"
    );

    let status = if edit.dry_run {
        FileStatus::Discarded
    } else {
        match doc.save(store) {
            Ok(()) => FileStatus::Written,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "write failed");
                FileStatus::Failed(e.to_string())
            }
        }
    };

    Ok(FileReport {
        name: doc.name(),
        path: path.to_path_buf(),
        previous,
        current,
        filter_pass,
        changed,
        status,
    })
}

fn mode_of(mutation: Mutation) -> Mode {
    match mutation {
        Mutation::Add => Mode::Add,
        Mutation::Set => Mode::Set,
        Mutation::Change => Mode::Change,
        Mutation::Remove => Mode::Remove,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ChangeKind;
    use crate::error::FrontmatError;
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_file("notes/task.md", "---\nType: Task\nStatus: Todo\n---\n\nDo it.\n")
            .with_file("notes/idea.md", "---\nType: Idea\n---\n\nThink.\n")
            .with_file("notes/bare.md", "No block here.\n")
    }

    fn targets() -> Vec<PathBuf> {
        ["notes/task.md", "notes/idea.md", "notes/bare.md"]
            .iter()
            .map(PathBuf::from)
            .collect()
    }

    fn edit<'a>(mutation: Mutation, key: &'a str, value: &'a str) -> Edit<'a> {
        Edit {
            mutation,
            key,
            value,
            filter: None,
            dry_run: false,
        }
    }

    #[test]
    fn set_adds_and_overwrites_across_files() {
        let mut store = store();
        let result = run(&mut store, &edit(Mutation::Set, "Status", "Done"), &targets()).unwrap();
        let report = result.edit.unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.files[0].previous.as_deref(), Some("Todo"));
        assert_eq!(report.files[0].current.as_deref(), Some("Done"));
        assert_eq!(report.files[0].change(), ChangeKind::Set);
        assert_eq!(report.files[1].change(), ChangeKind::Added);
        assert_eq!(report.totals.set, 1);
        assert_eq!(report.totals.added, 2);

        assert_eq!(
            store.get("notes/bare.md"),
            Some("---\nStatus: Done\n---\n\nNo block here.\n")
        );
        assert_eq!(
            store.get("notes/task.md"),
            Some("---\nType: Task\nStatus: Done\n---\n\nDo it.\n")
        );
    }

    #[test]
    fn results_follow_target_order() {
        let mut store = store();
        let mut order = targets();
        order.reverse();
        let result = run(&mut store, &edit(Mutation::Add, "A", "B"), &order).unwrap();
        let names: Vec<_> = result.edit.unwrap().files.into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["bare.md", "idea.md", "task.md"]);
    }

    #[test]
    fn change_leaves_files_without_key_alone() {
        let mut store = store();
        let result = run(&mut store, &edit(Mutation::Change, "Status", "Done"), &targets()).unwrap();
        let report = result.edit.unwrap();
        assert!(report.files[0].changed);
        assert!(!report.files[1].changed);
        assert_eq!(report.files[1].current, None);
        assert_eq!(report.totals.skipped, 2);
    }

    #[test]
    fn remove_records_previous_value() {
        let mut store = store();
        let result = run(&mut store, &edit(Mutation::Remove, "Type", ""), &targets()).unwrap();
        let report = result.edit.unwrap();
        assert_eq!(report.files[0].previous.as_deref(), Some("Task"));
        assert_eq!(report.files[0].current, None);
        assert_eq!(report.files[0].change(), ChangeKind::Removed);
        assert_eq!(report.totals.removed, 2);
        assert_eq!(store.get("notes/idea.md"), Some("---\n---\n\nThink.\n"));
    }

    #[test]
    fn filter_gates_mutation() {
        let mut store = store();
        let filter = Filter::new("Type", "Task");
        let mut e = edit(Mutation::Set, "Priority", "High");
        e.filter = Some(&filter);

        let report = run(&mut store, &e, &targets()).unwrap().edit.unwrap();
        assert!(report.files[0].filter_pass);
        assert_eq!(report.files[0].current.as_deref(), Some("High"));
        for skipped in &report.files[1..] {
            assert!(!skipped.filter_pass);
            assert_eq!(skipped.previous, skipped.current);
            assert!(!skipped.changed);
        }
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let mut store = store();
        let mut e = edit(Mutation::Set, "Status", "Done");
        e.dry_run = true;

        let result = run(&mut store, &e, &targets()).unwrap();
        let report = result.edit.unwrap();
        assert_eq!(report.files[0].current.as_deref(), Some("Done"));
        assert!(report.files.iter().all(|f| f.status == FileStatus::Discarded));
        assert_eq!(store.write_count(), 0);
        assert_eq!(
            store.get("notes/task.md"),
            Some("---\nType: Task\nStatus: Todo\n---\n\nDo it.\n")
        );
    }

    #[test]
    fn unreadable_and_malformed_files_do_not_stop_the_batch() {
        let mut store = store().with_file("notes/broken.md", "---\njust words\n---\n");
        let paths = vec![
            PathBuf::from("notes/missing.md"),
            PathBuf::from("notes/broken.md"),
            PathBuf::from("notes/task.md"),
        ];
        let result = run(&mut store, &edit(Mutation::Set, "Status", "Done"), &paths).unwrap();
        let report = result.edit.unwrap();

        assert!(report.files[0].is_failed());
        assert!(report.files[1].is_failed());
        assert_eq!(report.files[2].status, FileStatus::Written);
        assert_eq!(report.totals.failed, 2);
        assert_eq!(result.messages.len(), 2);
        assert_eq!(store.get("notes/broken.md"), Some("---\njust words\n---\n"));
    }

    #[test]
    fn write_failures_keep_computed_values() {
        let mut store = store();
        store.set_simulate_write_error(true);
        let report = run(&mut store, &edit(Mutation::Set, "Status", "Done"), &targets())
            .unwrap()
            .edit
            .unwrap();
        assert!(report.files.iter().all(FileReport::is_failed));
        assert_eq!(report.files[0].current.as_deref(), Some("Done"));
    }

    #[test]
    fn invalid_value_fails_before_touching_files() {
        let mut store = store();
        let err = run(&mut store, &edit(Mutation::Set, "url", "https://x"), &targets()).unwrap_err();
        assert!(matches!(err, FrontmatError::MalformedProperty { .. }));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn padded_key_is_reported_under_its_normalized_name() {
        let mut store = store();
        let report = run(&mut store, &edit(Mutation::Set, " Status ", "Done"), &targets())
            .unwrap()
            .edit
            .unwrap();
        assert_eq!(report.files[0].previous.as_deref(), Some("Todo"));
        assert_eq!(report.files[0].current.as_deref(), Some("Done"));
        assert_eq!(report.files[0].change(), ChangeKind::Set);
        assert_eq!(report.totals.set, 1);
        assert_eq!(report.totals.added, 2);

        let report = run(&mut store, &edit(Mutation::Remove, " Status ", ""), &targets())
            .unwrap()
            .edit
            .unwrap();
        assert_eq!(report.totals.removed, 3);
        assert_eq!(
            store.get("notes/task.md"),
            Some("---\nType: Task\n---\n\nDo it.\n")
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut store = store();
        let e = edit(Mutation::Set, "Status", "Done");
        run(&mut store, &e, &targets()).unwrap();
        let report = run(&mut store, &e, &targets()).unwrap().edit.unwrap();
        assert!(report.files.iter().all(|f| !f.changed));
        assert_eq!(report.totals.skipped, 3);
    }
}
