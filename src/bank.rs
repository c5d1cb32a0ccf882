// Quiz Lookup Question Bank
// Section identifier → record mapping, kept in discovery order

use crate::types::{BankStats, QuestionRecord, PLACEHOLDER_TYPE};
use rustc_hash::FxHashMap;

/// Parsed question bank
///
/// Sections iterate in the order their header first appeared. A bank is
/// built by one parse and replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    /// Sections in discovery order
    sections: Vec<(String, QuestionRecord)>,

    /// Section identifier → position in `sections`
    index: FxHashMap<String, usize>,
}

impl QuestionBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a section, starting it with an empty record
    ///
    /// Re-opening an existing section clears whatever it held before while
    /// keeping its original position.
    pub(crate) fn open_section(&mut self, id: &str) {
        match self.index.get(id) {
            Some(&pos) => self.sections[pos].1 = QuestionRecord::new(),
            None => {
                self.index.insert(id.to_string(), self.sections.len());
                self.sections.push((id.to_string(), QuestionRecord::new()));
            }
        }
    }

    /// Assign a field in an already opened section
    pub(crate) fn assign(&mut self, id: &str, key: &str, value: String) {
        if let Some(&pos) = self.index.get(id) {
            self.sections[pos].1.insert(key, value);
        }
    }

    /// Insert a whole record, replacing any section with the same identifier
    pub fn insert(&mut self, id: impl Into<String>, record: QuestionRecord) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&pos) => self.sections[pos].1 = record,
            None => {
                self.index.insert(id.clone(), self.sections.len());
                self.sections.push((id, record));
            }
        }
    }

    /// Direct lookup by section identifier
    pub fn get(&self, id: &str) -> Option<&QuestionRecord> {
        self.index.get(id).map(|&pos| &self.sections[pos].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over sections in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QuestionRecord)> {
        self.sections.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Section identifiers in discovery order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(id, _)| id.as_str())
    }

    /// Count sections, grouped by type label
    pub fn stats(&self) -> BankStats {
        let mut by_type: FxHashMap<String, usize> = FxHashMap::default();
        for (_, record) in &self.sections {
            let label = record.question_type().unwrap_or(PLACEHOLDER_TYPE);
            *by_type.entry(label.to_string()).or_insert(0) += 1;
        }

        BankStats {
            sections: self.sections.len(),
            by_type,
        }
    }
}
