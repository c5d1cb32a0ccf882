// Quiz Lookup Type Definitions
// Core types for question records, search results and errors

use rustc_hash::FxHashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Field holding the question kind (single-choice, multiple-choice, true/false)
pub const FIELD_TYPE: &str = "type";
/// Field holding the difficulty level
pub const FIELD_LEVEL: &str = "level";
/// Field holding the correct answer
pub const FIELD_ANSWER: &str = "answer";
/// Field holding the answer options, separated by `;`
pub const FIELD_OPTION: &str = "option";
/// Field holding the question text
pub const FIELD_QUESTION: &str = "question";

/// Placeholders shown in place of missing or empty fields
pub const PLACEHOLDER_TYPE: &str = "unknown type";
pub const PLACEHOLDER_LEVEL: &str = "unknown level";
pub const PLACEHOLDER_QUESTION: &str = "no question text";
pub const PLACEHOLDER_ANSWER: &str = "no answer";
pub const PLACEHOLDER_OPTION: &str = "no options";

/// Field a keyword search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Search the question text
    Question,
    /// Search the option text
    Option,
}

impl SearchField {
    /// Record key this field reads from
    pub fn key(&self) -> &'static str {
        match self {
            SearchField::Question => FIELD_QUESTION,
            SearchField::Option => FIELD_OPTION,
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One parsed section: field name → field value
///
/// The five known fields have typed accessors; any other key is kept
/// verbatim and reachable through [`QuestionRecord::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionRecord {
    fields: FxHashMap<String, String>,
}

impl QuestionRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value if there was one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Raw field value, present even when empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }

    /// Field value, treating an empty string the same as an absent field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn question_type(&self) -> Option<&str> {
        self.field(FIELD_TYPE)
    }

    pub fn level(&self) -> Option<&str> {
        self.field(FIELD_LEVEL)
    }

    pub fn answer(&self) -> Option<&str> {
        self.field(FIELD_ANSWER)
    }

    pub fn option(&self) -> Option<&str> {
        self.field(FIELD_OPTION)
    }

    pub fn question(&self) -> Option<&str> {
        self.field(FIELD_QUESTION)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QuestionRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// A section matched by a keyword search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    /// Section identifier
    pub id: String,

    /// The matched record
    pub record: QuestionRecord,

    /// Number of search terms found in the searched field
    pub score: usize,
}

impl ScoredMatch {
    /// Value of the given field, empty when missing
    pub fn text(&self, field: SearchField) -> &str {
        self.record.get(field.key()).unwrap_or_default()
    }
}

/// Outcome of a keyword query made through [`crate::QuizLookup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Ranked keyword matches, best first
    Matches(Vec<ScoredMatch>),

    /// No keyword matched, but the phrase is itself a section identifier
    Direct { id: String, record: QuestionRecord },

    /// Nothing matched
    NoMatch,
}

/// Summary of a loaded question bank
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankStats {
    /// Number of sections
    pub sections: usize,

    /// Sections per type label (missing type counted under the placeholder)
    pub by_type: FxHashMap<String, usize>,
}

/// Lookup errors surfaced to the application layer
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Question bank is not loaded")]
    BankNotLoaded,

    #[error("Invalid query: empty question id")]
    EmptyId,

    #[error("Invalid query: empty search phrase")]
    EmptyPhrase,

    #[error("No question with id '{id}'")]
    NotFound { id: String },

    #[error("Failed to read question bank from {path}: {source}")]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to access history file {path}: {source}")]
    HistoryIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("History file is not valid JSON: {0}")]
    HistoryFormat(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_key() {
        assert_eq!(SearchField::Question.key(), "question");
        assert_eq!(SearchField::Option.key(), "option");
        assert_eq!(SearchField::Option.to_string(), "option");
    }

    #[test]
    fn test_empty_field_is_missing() {
        let record: QuestionRecord = [("question", ""), ("answer", "B")].into_iter().collect();

        assert_eq!(record.get("question"), Some(""));
        assert_eq!(record.question(), None);
        assert_eq!(record.answer(), Some("B"));
        assert_eq!(record.level(), None);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let mut record = QuestionRecord::new();
        record.insert("explanation", "See chapter 3");

        assert_eq!(record.get("explanation"), Some("See chapter 3"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut record = QuestionRecord::new();
        assert_eq!(record.insert("answer", "A"), None);
        assert_eq!(record.insert("answer", "C"), Some("A".to_string()));
        assert_eq!(record.answer(), Some("C"));
    }

    #[test]
    fn test_scored_match_text() {
        let matched = ScoredMatch {
            id: "Q1".to_string(),
            record: [("question", "Parcel weight")].into_iter().collect(),
            score: 1,
        };

        assert_eq!(matched.text(SearchField::Question), "Parcel weight");
        assert_eq!(matched.text(SearchField::Option), "");
    }

    #[test]
    fn test_error_display() {
        let err = LookupError::NotFound {
            id: "Q99".to_string(),
        };
        assert_eq!(err.to_string(), "No question with id 'Q99'");
    }
}
