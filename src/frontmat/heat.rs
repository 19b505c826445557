//! # Property Heat
//!
//! Frequency counting across a set of documents, backing the `summarize` and `show`
//! modes.
//!
//! - [`HeatMap`] counts `(key, value)` occurrences over every property it is fed.
//! - [`ValueIndex`] records, for one key, which files carry each value.
//!
//! Both compile into plain, serializable reports. Keys and values come out sorted
//! lexicographically; file lists keep the order files were seen in.

use crate::document::Document;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueHeat {
    pub value: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyHeat {
    pub key: String,
    /// Occurrences of this key, summed over all of its values.
    pub frequency: usize,
    pub values: Vec<ValueHeat>,
}

impl KeyHeat {
    pub fn unique_values(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub paths: Vec<PathBuf>,
    pub keys: Vec<KeyHeat>,
    /// Sum of every leaf count.
    pub total: usize,
    /// Distinct `(key, value)` pairs.
    pub unique_values: usize,
}

#[derive(Debug, Default)]
pub struct HeatMap {
    keys: BTreeMap<String, BTreeMap<String, usize>>,
}

impl HeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, key: &str, value: &str) {
        *self
            .keys
            .entry(key.to_string())
            .or_default()
            .entry(value.to_string())
            .or_insert(0) += 1;
    }

    pub fn mark_document(&mut self, doc: &Document) {
        for property in doc.properties() {
            self.mark(property.key(), property.value());
        }
    }

    pub fn total(&self) -> usize {
        self.keys.values().flat_map(|values| values.values()).sum()
    }

    pub fn compile(&self) -> Vec<KeyHeat> {
        self.keys
            .iter()
            .map(|(key, values)| KeyHeat {
                key: key.clone(),
                frequency: values.values().sum(),
                values: values
                    .iter()
                    .map(|(value, &frequency)| ValueHeat {
                        value: value.clone(),
                        frequency,
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn into_summary(self, paths: Vec<PathBuf>) -> Summary {
        let keys = self.compile();
        Summary {
            paths,
            total: keys.iter().map(|k| k.frequency).sum(),
            unique_values: keys.iter().map(KeyHeat::unique_values).sum(),
            keys,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueLocations {
    pub value: String,
    pub frequency: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueReport {
    pub key: String,
    pub paths: Vec<PathBuf>,
    pub values: Vec<ValueLocations>,
    /// Documents in which the key was found.
    pub occurrences: usize,
    pub unique: usize,
}

#[derive(Debug, Default)]
pub struct ValueIndex {
    values: BTreeMap<String, Vec<String>>,
    occurrences: usize,
}

impl ValueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, value: &str, file: impl Into<String>) {
        self.values
            .entry(value.to_string())
            .or_default()
            .push(file.into());
        self.occurrences += 1;
    }

    /// Records `doc` under its value for `key`, if it has one.
    pub fn mark_document(&mut self, doc: &Document, key: &str) -> bool {
        match doc.get(key) {
            Some(value) => {
                self.mark(value, doc.name());
                true
            }
            None => false,
        }
    }

    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    pub fn compile(&self) -> Vec<ValueLocations> {
        self.values
            .iter()
            .map(|(value, files)| ValueLocations {
                value: value.clone(),
                frequency: files.len(),
                files: files.clone(),
            })
            .collect()
    }

    pub fn into_report(self, key: impl Into<String>, paths: Vec<PathBuf>) -> ValueReport {
        let values = self.compile();
        ValueReport {
            key: key.into(),
            paths,
            unique: values.len(),
            occurrences: self.occurrences,
            values,
        }
    }
}
