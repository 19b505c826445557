//! # Documents
//!
//! A [`Document`] is one text file split into three parts:
//!
//! ```text
//! preamble      lines before the opening marker (only in malformed files)
//! ---
//! properties    one `key: value` per line
//! ---
//! body          everything after the closing marker, untouched
//! ```
//!
//! The split happens once, in [`Document::parse`]. From then on all edits go through
//! the structured fields and [`Document::render`] rebuilds the whole text from them.
//! There is no raw line buffer that gets patched in place.
//!
//! ## Block Rules
//!
//! - The block is delimited by the first two lines equal to [`MARKER`]. Later marker
//!   lines (horizontal rules) belong to the body.
//! - With fewer than two markers, an empty block is synthesized at the top and the
//!   whole file becomes body.
//! - Lines inside the block shorter than three characters are stray blanks and are
//!   dropped. Any other line must parse as a [`Property`] or the whole document fails
//!   to load.
//! - On render, exactly one blank line separates the closing marker from the body.
//!   An existing blank line is reused, never doubled.
//! - The line terminator style and the presence of a final newline are preserved.

use crate::error::{FrontmatError, Result};
use crate::property::Property;
use crate::store::DocumentStore;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const MARKER: &str = "---";

const MIN_PROPERTY_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Addresses either a property (by key) or a body line (by index).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Key(String),
    Line(usize),
}

impl From<&str> for Lookup {
    fn from(key: &str) -> Self {
        Lookup::Key(key.to_string())
    }
}

impl From<usize> for Lookup {
    fn from(index: usize) -> Self {
        Lookup::Line(index)
    }
}

impl TryFrom<&Value> for Lookup {
    type Error = FrontmatError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(key) => Ok(Lookup::Key(key.clone())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(Lookup::Line)
                .ok_or_else(|| FrontmatError::InvalidIndexType(n.to_string())),
            other => Err(FrontmatError::InvalidIndexType(other.to_string())),
        }
    }
}

/// The file name of `path`, or the whole path when it has none.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    preamble: Vec<String>,
    properties: Vec<Property>,
    body: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl Document {
    /// Splits `text` into preamble, properties and body.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let mut markers = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.trim_end() == MARKER)
            .map(|(i, _)| i);

        let (preamble, block, body) = match (markers.next(), markers.next()) {
            (Some(open), Some(close)) => (
                &lines[..open],
                &lines[open + 1..close],
                &lines[close + 1..],
            ),
            _ => (&lines[..0], &lines[..0], &lines[..]),
        };

        let properties = block
            .iter()
            .filter(|line| line.trim_end().len() >= MIN_PROPERTY_LEN)
            .map(|line| Property::parse(line))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.into(),
            preamble: preamble.iter().map(|l| l.to_string()).collect(),
            properties,
            body: body.iter().map(|l| l.to_string()).collect(),
            line_ending: LineEnding::detect(text),
            trailing_newline: text.is_empty() || text.ends_with('\n'),
        })
    }

    pub fn load<S: DocumentStore>(store: &S, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = store.read(&path)?;
        Self::parse(path, &text)
    }

    pub fn save<S: DocumentStore>(&self, store: &mut S) -> Result<()> {
        store.write(&self.path, &self.render())
    }

    /// Rebuilds the full file text from the structured fields.
    pub fn render(&self) -> String {
        let nl = self.line_ending.as_str();
        let mut out = String::new();

        for line in &self.preamble {
            out.push_str(line);
            out.push_str(nl);
        }

        out.push_str(MARKER);
        out.push_str(nl);
        for property in &self.properties {
            out.push_str(&property.to_string());
            out.push_str(nl);
        }
        out.push_str(MARKER);

        if let Some(first) = self.body.first() {
            out.push_str(nl);
            if !first.trim().is_empty() {
                out.push_str(nl);
            }
            out.push_str(&self.body.join(nl));
        }

        if self.trailing_newline {
            out.push_str(nl);
        }
        out
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name, used to label the document in reports.
    pub fn name(&self) -> String {
        file_label(&self.path)
    }

    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    // --- Properties ---

    /// First property whose key matches exactly.
    pub fn find(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key() == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.key() == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key).map(Property::value)
    }

    /// Appends `property` unless its key is already present.
    pub fn add_if_missing(&mut self, property: Property) -> bool {
        if self.find(property.key()).is_some() {
            return false;
        }
        self.properties.push(property);
        true
    }

    /// Overwrites the value of an existing key, or appends the property.
    pub fn set_or_add(&mut self, property: Property) -> bool {
        match self.find_mut(property.key()) {
            Some(existing) if existing.value() == property.value() => false,
            Some(existing) => {
                existing.assign_value(&property);
                true
            }
            None => {
                self.properties.push(property);
                true
            }
        }
    }

    /// Overwrites the value of an existing key. Absent keys are left absent.
    pub fn change_if_exists(&mut self, property: Property) -> bool {
        match self.find_mut(property.key()) {
            Some(existing) if existing.value() != property.value() => {
                existing.assign_value(&property);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.properties.iter().position(|p| p.key() == key) {
            Some(index) => {
                self.properties.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copies over every property of `other` whose key is missing here.
    ///
    /// Values already present on `self` are never touched.
    pub fn incorporate(&mut self, other: &Document) {
        for property in &other.properties {
            self.add_if_missing(property.clone());
        }
    }

    /// Builds a property from `key` and `value` and sets it (set-or-add).
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        Ok(self.set_or_add(Property::new(key, value)?))
    }

    // --- Body lines ---

    pub fn line(&self, index: usize) -> Option<&str> {
        self.body.get(index).map(String::as_str)
    }

    pub fn set_line(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let len = self.body.len();
        let slot = self.body.get_mut(index).ok_or_else(|| {
            FrontmatError::Api(format!("Body line {} out of range ({} lines)", index, len))
        })?;
        *slot = text.into();
        Ok(())
    }

    pub fn delete_line(&mut self, index: usize) -> Option<String> {
        (index < self.body.len()).then(|| self.body.remove(index))
    }

    // --- Containment ---

    pub fn contains_lookup(&self, lookup: &Lookup) -> bool {
        match lookup {
            Lookup::Key(key) => self.find(key).is_some(),
            Lookup::Line(index) => *index < self.body.len(),
        }
    }

    /// Containment check for untyped lookups: strings are keys, non-negative
    /// integers are body line indexes, anything else is rejected.
    pub fn contains(&self, lookup: &Value) -> Result<bool> {
        Ok(self.contains_lookup(&Lookup::try_from(lookup)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    const NOTE: &str = "---\nType: Task\nStatus: Todo\n---\n\n# Heading\n\nBody text.\n";

    fn doc(text: &str) -> Document {
        Document::parse("notes/note.md", text).unwrap()
    }

    fn prop(key: &str, value: &str) -> Property {
        Property::new(key, value).unwrap()
    }

    #[test]
    fn parses_block_and_body() {
        let d = doc(NOTE);
        assert_eq!(d.get("Type"), Some("Task"));
        assert_eq!(d.get("Status"), Some("Todo"));
        assert_eq!(d.body(), &["", "# Heading", "", "Body text."]);
        assert_eq!(d.name(), "note.md");
    }

    #[test]
    fn round_trips_unmodified_documents() {
        assert_eq!(doc(NOTE).render(), NOTE);
    }

    #[test]
    fn round_trips_crlf_and_missing_final_newline() {
        let text = "---\r\nA: B\r\n---\r\n\r\nbody";
        assert_eq!(doc(text).render(), text);
    }

    #[test]
    fn inserts_single_blank_line_after_block() {
        let d = doc("---\nA: B\n---\nbody\n");
        assert_eq!(d.render(), "---\nA: B\n---\n\nbody\n");
        // Rendering the result again is stable.
        assert_eq!(doc(&d.render()).render(), "---\nA: B\n---\n\nbody\n");
    }

    #[test]
    fn synthesizes_block_when_missing() {
        let d = doc("Just text\nmore\n");
        assert!(d.properties().is_empty());
        assert_eq!(d.body(), &["Just text", "more"]);
        assert_eq!(d.render(), "---\n---\n\nJust text\nmore\n");
    }

    #[test]
    fn single_marker_is_treated_as_body() {
        let d = doc("---\nA: B\n");
        assert!(d.properties().is_empty());
        assert_eq!(d.body(), &["---", "A: B"]);
    }

    #[test]
    fn empty_file_gets_empty_block() {
        assert_eq!(doc("").render(), "---\n---\n");
    }

    #[test]
    fn later_markers_stay_in_body() {
        let d = doc("---\nA: B\n---\n\nabove\n---\nbelow\n");
        assert_eq!(d.properties().len(), 1);
        assert_eq!(d.body(), &["", "above", "---", "below"]);
    }

    #[test]
    fn preserves_preamble() {
        let text = "stray\n---\nA: B\n---\n\nbody\n";
        let d = doc(text);
        assert_eq!(d.preamble(), &["stray"]);
        assert_eq!(d.render(), text);
    }

    #[test]
    fn skips_short_lines_inside_block() {
        let d = doc("---\nA: B\n\n  \nC: D\n---\n");
        assert_eq!(d.properties().len(), 2);
        assert_eq!(d.render(), "---\nA: B\nC: D\n---\n");
    }

    #[test]
    fn malformed_property_fails_the_whole_load() {
        let err = Document::parse("x.md", "---\nA: B\nnot a property\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatError::MalformedProperty { .. }));
    }

    #[test]
    fn file_label_prefers_file_name() {
        assert_eq!(file_label(Path::new("notes/a.md")), "a.md");
        assert_eq!(file_label(Path::new("/")), "/");
    }

    #[test]
    fn find_is_exact_and_case_sensitive() {
        let d = doc(NOTE);
        assert!(d.find("status").is_none());
        assert_eq!(d.find("Status").map(Property::value), Some("Todo"));
    }

    #[test]
    fn add_if_missing_is_idempotent() {
        let mut d = doc("---\n---\n");
        assert!(d.add_if_missing(prop("Status", "Done")));
        assert!(!d.add_if_missing(prop("Status", "Other")));
        assert_eq!(d.get("Status"), Some("Done"));
    }

    #[test]
    fn set_or_add_overwrites_then_noops() {
        let mut d = doc(NOTE);
        assert!(d.set_or_add(prop("Status", "Done")));
        assert_eq!(d.get("Status"), Some("Done"));
        assert!(!d.set_or_add(prop("Status", "Done")));
        assert!(d.set_or_add(prop("Priority", "High")));
        assert_eq!(d.properties().last().map(Property::key), Some("Priority"));
    }

    #[test]
    fn change_if_exists_never_adds() {
        let mut d = doc(NOTE);
        assert!(!d.change_if_exists(prop("Priority", "High")));
        assert!(d.find("Priority").is_none());
        assert!(d.change_if_exists(prop("Status", "Done")));
        assert!(!d.change_if_exists(prop("Status", "Done")));
    }

    #[test]
    fn remove_reports_presence() {
        let mut d = doc(NOTE);
        assert!(d.remove("Type"));
        assert!(!d.remove("Type"));
        assert_eq!(d.render(), "---\nStatus: Todo\n---\n\n# Heading\n\nBody text.\n");
    }

    #[test]
    fn incorporate_is_one_way_and_non_destructive() {
        let mut d = doc(NOTE);
        let other = doc("---\nStatus: Done\nOwner: sam\n---\n");
        d.incorporate(&other);
        assert_eq!(d.get("Status"), Some("Todo"));
        assert_eq!(d.get("Owner"), Some("sam"));
        assert!(other.find("Type").is_none());
    }

    #[test]
    fn mutations_keep_body_untouched() {
        let mut d = doc(NOTE);
        d.set("Status", "Done").unwrap();
        d.add_if_missing(prop("Up", "[[Home]]"));
        assert_eq!(
            d.render(),
            "---\nType: Task\nStatus: Done\nUp: \"[[Home]]\"\n---\n\n# Heading\n\nBody text.\n"
        );
    }

    #[test]
    fn body_line_accessors() {
        let mut d = doc(NOTE);
        assert_eq!(d.line(1), Some("# Heading"));
        d.set_line(1, "# Renamed").unwrap();
        assert_eq!(d.line(1), Some("# Renamed"));
        assert!(d.set_line(99, "x").is_err());
        assert_eq!(d.delete_line(3), Some("Body text.".to_string()));
        assert_eq!(d.delete_line(3), None);
    }

    #[test]
    fn contains_accepts_keys_and_indexes() {
        let d = doc(NOTE);
        assert!(d.contains(&json!("Type")).unwrap());
        assert!(!d.contains(&json!("Nope")).unwrap());
        assert!(d.contains(&json!(0)).unwrap());
        assert!(!d.contains(&json!(42)).unwrap());
        assert!(d.contains_lookup(&Lookup::from("Status")));
        assert!(d.contains_lookup(&Lookup::from(3usize)));
    }

    #[test]
    fn contains_rejects_other_lookup_types() {
        let d = doc(NOTE);
        for bad in [json!(null), json!(true), json!(-1), json!(1.5), json!(["Type"])] {
            assert!(matches!(
                d.contains(&bad),
                Err(FrontmatError::InvalidIndexType(_))
            ));
        }
    }

    #[test]
    fn load_and_save_through_store() {
        let mut store = InMemoryStore::new().with_file("notes/a.md", "body only\n");
        let mut d = Document::load(&store, "notes/a.md").unwrap();
        d.set("Status", "Done").unwrap();
        d.save(&mut store).unwrap();
        assert_eq!(
            store.get("notes/a.md"),
            Some("---\nStatus: Done\n---\n\nbody only\n")
        );
    }

    #[test]
    fn load_missing_file_fails() {
        let store = InMemoryStore::new();
        assert!(matches!(
            Document::load(&store, "missing.md"),
            Err(FrontmatError::FileAccess { .. })
        ));
    }
}
