use colored::{ColoredString, Colorize};
use frontmat::api::{CmdMessage, MessageLevel};
use frontmat::commands::{ChangeKind, EditReport, FileReport, FileStatus};
use frontmat::config::{FrontmatConfig, Verbosity};
use frontmat::heat::{Summary, ValueReport};
use unicode_width::UnicodeWidthStr;

const ABSENT: &str = "(none)";

pub(super) fn print_messages(messages: &[CmdMessage], verbosity: Verbosity) {
    for message in messages {
        match message.level {
            MessageLevel::Error => eprintln!("{}", message.content.red()),
            _ if verbosity == Verbosity::Quiet => {}
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn change_tag(kind: ChangeKind) -> ColoredString {
    match kind {
        ChangeKind::Added => "ADD".green(),
        ChangeKind::Set => "SET".yellow(),
        ChangeKind::Removed => "REM".red(),
        ChangeKind::Skipped => "SKIP".dimmed(),
    }
}

fn file_line(file: &FileReport, width: usize) -> String {
    let path = file.path.display().to_string();
    let padding = " ".repeat(width.saturating_sub(path.width()));
    let path = format!("{}{}", path.blue(), padding);

    if let FileStatus::Failed(reason) = &file.status {
        return format!("{} ({}) {}", path, "FAIL".red().bold(), reason);
    }
    format!(
        "{} ({}) {} -> {}",
        path,
        change_tag(file.change()),
        file.previous.as_deref().unwrap_or(ABSENT).dimmed(),
        file.current.as_deref().unwrap_or(ABSENT).yellow()
    )
}

/// Per-file lines and totals for an editing batch.
///
/// Unchanged files are only listed when `verbose` is set.
pub(super) fn render_edit(report: &EditReport, verbose: bool) -> String {
    let width = report
        .files
        .iter()
        .map(|f| f.path.display().to_string().width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for file in &report.files {
        if verbose || file.is_failed() || file.change() != ChangeKind::Skipped {
            out.push_str(&file_line(file, width));
            out.push('\n');
        }
    }

    let totals = &report.totals;
    out.push_str(&format!(
        "{}: {}\n",
        "Total Target Files".cyan(),
        totals.total
    ));
    for (label, count) in [
        ("Added", totals.added),
        ("Set", totals.set),
        ("Removed", totals.removed),
        ("Skipped", totals.skipped),
        ("Failed", totals.failed),
    ] {
        if count > 0 {
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }
    out
}

pub(super) fn render_summary(summary: &Summary, verbose: bool) -> String {
    let mut out = String::new();
    for key in &summary.keys {
        out.push_str(&format!(
            "Property: \"{}\" - Occurrences: {}, Unique Values: {}\n",
            key.key.bold(),
            key.frequency.to_string().cyan(),
            key.unique_values().to_string().yellow()
        ));
        if verbose {
            for value in &key.values {
                out.push_str(&format!(
                    "  - Value: \"{}\" - Occurrences: {}\n",
                    value.value.yellow(),
                    value.frequency.to_string().cyan()
                ));
            }
        }
    }
    out.push('\n');
    out.push_str(&format!("Unique Property keys: {}\n", summary.keys.len()));
    out.push_str(&format!(
        "Unique Property values: {}\n",
        summary.unique_values
    ));
    out.push_str(&format!("Total Properties: {}\n", summary.total));
    out
}

pub(super) fn render_values(report: &ValueReport) -> String {
    let mut out = String::new();
    for value in &report.values {
        out.push_str(&format!(
            "\"{}\": Occurs in {} files.\n",
            value.value.yellow(),
            value.frequency.to_string().cyan()
        ));
        for file in &value.files {
            out.push_str(&format!("  - {}\n", file.blue()));
        }
    }
    out.push('\n');
    out.push_str(&format!("Property: {}\n", report.key.bold()));
    out.push_str(&format!("Occurrences: {}\n", report.occurrences));
    out.push_str(&format!("Values: {}\n", report.unique));
    out
}

pub(super) fn render_config(config: &FrontmatConfig) -> String {
    ["dry-run", "verbosity", "extensions"]
        .iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}
