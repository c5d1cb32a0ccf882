// Quiz Lookup API
// Owns the current question bank and answers id / keyword queries against it

use crate::bank::QuestionBank;
use crate::matcher;
use crate::parser::parse_ini;
use crate::source::BankSource;
use crate::types::{BankStats, LookupError, QueryOutcome, QuestionRecord, SearchField};
use tracing::{debug, info};

/// Main quiz lookup engine
///
/// Holds at most one bank at a time. Loading a new bank replaces the old
/// one in a single step; a failed load leaves the current bank untouched.
#[derive(Debug, Clone, Default)]
pub struct QuizLookup {
    /// Current bank, if one has been loaded
    bank: Option<QuestionBank>,
}

impl QuizLookup {
    /// Create an engine with no bank loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine around an existing bank
    pub fn with_bank(bank: QuestionBank) -> Self {
        Self { bank: Some(bank) }
    }

    /// Parse text and use it as the current bank
    pub fn from_text(text: &str) -> Self {
        Self::with_bank(parse_ini(text))
    }

    /// Read and parse a source, then swap it in as the current bank
    ///
    /// # Returns
    /// Statistics of the newly loaded bank
    pub fn load(&mut self, source: &BankSource) -> Result<BankStats, LookupError> {
        let text = source.read()?;
        let bank = parse_ini(&text);
        let stats = bank.stats();

        info!(source = %source, sections = stats.sections, "question bank loaded");
        self.replace_bank(bank);

        Ok(stats)
    }

    /// Replace the current bank, returning the previous one
    pub fn replace_bank(&mut self, bank: QuestionBank) -> Option<QuestionBank> {
        self.bank.replace(bank)
    }

    pub fn is_loaded(&self) -> bool {
        self.bank.is_some()
    }

    /// The current bank
    pub fn bank(&self) -> Result<&QuestionBank, LookupError> {
        self.bank.as_ref().ok_or(LookupError::BankNotLoaded)
    }

    /// Look up a question by identifier
    ///
    /// Surrounding whitespace in `id` is ignored.
    pub fn get_by_id(&self, id: &str) -> Result<&QuestionRecord, LookupError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LookupError::EmptyId);
        }

        matcher::get_by_id(self.bank()?, id)
    }

    /// Keyword search with identifier fallback
    ///
    /// # Returns
    /// - `Matches` with ranked results when any section matched
    /// - `Direct` when nothing matched but `phrase` is a section identifier
    /// - `NoMatch` otherwise
    pub fn search(&self, phrase: &str, field: SearchField) -> Result<QueryOutcome, LookupError> {
        let bank = self.bank()?;

        if phrase.trim().is_empty() {
            return Err(LookupError::EmptyPhrase);
        }

        let matches = matcher::search(bank, phrase, field);
        debug!(%field, phrase, matches = matches.len(), "keyword search");

        if !matches.is_empty() {
            return Ok(QueryOutcome::Matches(matches));
        }

        match bank.get(phrase) {
            Some(record) => Ok(QueryOutcome::Direct {
                id: phrase.to_string(),
                record: record.clone(),
            }),
            None => Ok(QueryOutcome::NoMatch),
        }
    }

    /// Keyword search keeping at most `limit` ranked matches
    pub fn search_limit(
        &self,
        phrase: &str,
        field: SearchField,
        limit: usize,
    ) -> Result<QueryOutcome, LookupError> {
        let mut outcome = self.search(phrase, field)?;
        if let QueryOutcome::Matches(matches) = &mut outcome {
            matches.truncate(limit);
        }
        Ok(outcome)
    }

    /// Statistics about the current bank
    pub fn stats(&self) -> Result<BankStats, LookupError> {
        Ok(self.bank()?.stats())
    }
}
