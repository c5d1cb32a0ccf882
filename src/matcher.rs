// Quiz Lookup Keyword Matcher
// Filters and ranks bank sections against a search phrase

use crate::bank::QuestionBank;
use crate::types::{LookupError, QuestionRecord, ScoredMatch, SearchField};

/// Lower-cased, whitespace-delimited terms of a search phrase
///
/// Terms keep their original order and duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    /// Normalize a phrase into terms
    ///
    /// # Examples
    /// ```
    /// # use quiz_lookup::matcher::SearchTerms;
    /// let terms = SearchTerms::parse("  Parcel   WEIGHT ");
    /// assert_eq!(terms.as_slice(), ["parcel", "weight"]);
    /// ```
    pub fn parse(phrase: &str) -> Self {
        let terms = phrase
            .trim()
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Self { terms }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when every term is a substring of `text` (vacuously true with no terms)
    pub fn matches_all(&self, text: &str) -> bool {
        self.terms.iter().all(|term| text.contains(term.as_str()))
    }

    /// Number of terms found in `text`
    pub fn score(&self, text: &str) -> usize {
        self.terms
            .iter()
            .filter(|term| text.contains(term.as_str()))
            .count()
    }
}

/// Keyword search over one field of every section
///
/// A section is a candidate when its field is non-empty and contains every
/// term (case-insensitive). Because of that rule the score always equals
/// the number of terms. Results are sorted by score, best first; ties keep
/// discovery order.
///
/// An empty term set matches every section whose field is non-empty.
///
/// # Examples
/// ```
/// # use quiz_lookup::{parse_ini, search, SearchField};
/// let bank = parse_ini("[1]\nquestion = Foo and Bar\n[2]\nquestion = only foo\n");
/// let results = search(&bank, "foo bar", SearchField::Question);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].id, "1");
/// ```
pub fn search(bank: &QuestionBank, phrase: &str, field: SearchField) -> Vec<ScoredMatch> {
    search_terms(bank, &SearchTerms::parse(phrase), field)
}

/// Keyword search with already normalized terms
pub fn search_terms(
    bank: &QuestionBank,
    terms: &SearchTerms,
    field: SearchField,
) -> Vec<ScoredMatch> {
    let mut results = Vec::new();

    for (id, record) in bank.iter() {
        let text = record.get(field.key()).unwrap_or_default().to_lowercase();

        if text.is_empty() || !terms.matches_all(&text) {
            continue;
        }

        results.push(ScoredMatch {
            id: id.to_string(),
            record: record.clone(),
            score: terms.score(&text),
        });
    }

    // Stable: equal scores stay in discovery order
    results.sort_by(|a, b| b.score.cmp(&a.score));

    results
}

/// Direct lookup by section identifier, no fuzzy matching
pub fn get_by_id<'a>(bank: &'a QuestionBank, id: &str) -> Result<&'a QuestionRecord, LookupError> {
    bank.get(id).ok_or_else(|| LookupError::NotFound { id: id.to_string() })
}
