//! # Quiz Lookup: INI Question Bank Search
//!
//! Parses a small INI question bank and answers lookups against it, either
//! directly by question id or by keyword over the question or option text.
//!
//! ## Question Bank Format
//!
//! ```ini
//! ; comment
//! [217001]
//! type = dx
//! level = slow
//! question = Which document travels with a parcel?
//! option = A.Invoice;B.Waybill
//! answer = B
//! ```
//!
//! - `type`: `dx` single-choice, `dxx` multiple-choice, `pd` true/false
//! - `level`: `slow`, `medium`, `high`, `engineer`, `hengineer`
//! - `answer`: `t` / `f` for true/false questions
//! - an empty `option` becomes the default true/false option text
//! - any other key is kept as-is
//!
//! ## Example Usage
//!
//! ```
//! use quiz_lookup::{QueryOutcome, QuizLookup, SearchField};
//!
//! let lookup = QuizLookup::from_text("[Q1]\ntype = dx\nquestion = Parcel weight\n");
//!
//! // Direct lookup
//! let record = lookup.get_by_id("Q1")?;
//! assert_eq!(record.question_type(), Some("single-choice"));
//!
//! // Keyword search (every term must appear)
//! let outcome = lookup.search("parcel WEIGHT", SearchField::Question)?;
//! assert!(matches!(outcome, QueryOutcome::Matches(ref m) if m.len() == 1));
//! # Ok::<(), quiz_lookup::LookupError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Parser** - Turns INI text into a `QuestionBank`
//! - **Label tables** - Code → label substitution applied while parsing
//! - **Keyword Matcher** - AND-of-terms filtering and stable ranking
//! - **QuizLookup API** - Owns the current bank, id lookup, search fallback
//! - **Query History** - Ten most recent lookups, persisted as JSON

pub mod bank;
pub mod config;
pub mod data;
pub mod history;
pub mod labels;
pub mod matcher;
pub mod parser;
pub mod search;
pub mod source;
pub mod types;

// Re-export main types and functions for convenience
pub use bank::QuestionBank;
pub use config::Config;
pub use data::{DataInfo, DataLoader};
pub use history::{HistoryEntry, QueryHistory, HISTORY_LIMIT};
pub use matcher::{get_by_id, search, SearchTerms};
pub use parser::parse_ini;
pub use search::QuizLookup;
pub use source::BankSource;
pub use types::{BankStats, LookupError, QueryOutcome, QuestionRecord, ScoredMatch, SearchField};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
