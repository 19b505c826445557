//! # Mutations
//!
//! The four editing modes as one tagged enum. Each variant maps onto a single
//! [`Document`] primitive, and every primitive reports whether the document changed,
//! so applying the same mutation twice is a no-op the second time.
//!
//! | Mutation | Key present, same value | Key present, other value | Key absent |
//! |----------|-------------------------|--------------------------|------------|
//! | `Add`    | no-op                   | no-op                    | append     |
//! | `Set`    | no-op                   | overwrite                | append     |
//! | `Change` | no-op                   | overwrite                | no-op      |
//! | `Remove` | delete                  | delete                   | no-op      |

use crate::document::Document;
use crate::property::Property;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    Add,
    Set,
    Change,
    Remove,
}

impl Mutation {
    /// Whether this mutation needs a value to write.
    pub fn takes_value(self) -> bool {
        !matches!(self, Mutation::Remove)
    }

    /// Applies the mutation for `property` (`Remove` only reads its key).
    ///
    /// Returns whether the document changed.
    pub fn apply(self, doc: &mut Document, property: &Property) -> bool {
        match self {
            Mutation::Add => doc.add_if_missing(property.clone()),
            Mutation::Set => doc.set_or_add(property.clone()),
            Mutation::Change => doc.change_if_exists(property.clone()),
            Mutation::Remove => doc.remove(property.key()),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mutation::Add => "add",
            Mutation::Set => "set",
            Mutation::Change => "change",
            Mutation::Remove => "remove",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::parse("n.md", text).unwrap()
    }

    fn prop(key: &str, value: &str) -> Property {
        Property::new(key, value).unwrap()
    }

    #[test]
    fn add_only_fills_missing_keys() {
        let mut d = doc("---\n---\n");
        assert!(Mutation::Add.apply(&mut d, &prop("Status", "Done")));
        assert!(!Mutation::Add.apply(&mut d, &prop("Status", "Todo")));
        assert_eq!(d.get("Status"), Some("Done"));
    }

    #[test]
    fn set_overwrites_and_adds() {
        let mut d = doc("---\nStatus: Todo\n---\n");
        assert!(Mutation::Set.apply(&mut d, &prop("Status", "Done")));
        assert!(!Mutation::Set.apply(&mut d, &prop("Status", "Done")));
        assert_eq!(d.get("Status"), Some("Done"));
    }

    #[test]
    fn change_skips_absent_keys() {
        let mut d = doc("---\nStatus: Todo\n---\n");
        assert!(!Mutation::Change.apply(&mut d, &prop("Priority", "High")));
        assert!(d.find("Priority").is_none());
    }

    #[test]
    fn remove_ignores_value() {
        let mut d = doc("---\nStatus: Todo\n---\n");
        assert!(Mutation::Remove.apply(&mut d, &prop("Status", "")));
        assert!(!Mutation::Remove.apply(&mut d, &prop("Status", "anything")));
    }

    #[test]
    fn remove_uses_normalized_key() {
        let mut d = doc("---\nStatus: Todo\n---\n");
        assert!(Mutation::Remove.apply(&mut d, &prop("  Status ", "")));
        assert!(d.properties().is_empty());
    }

    #[test]
    fn values_are_normalized_before_comparison() {
        let mut d = doc("---\nUp: \"[[Home]]\"\n---\n");
        assert!(!Mutation::Set.apply(&mut d, &prop("Up", "[[Home]]")));
    }
}
