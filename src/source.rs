// Quiz Lookup Bank Sources
// Where raw question bank text comes from

use crate::data::DataLoader;
use crate::types::LookupError;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Name that selects the bundled bank when parsing a source from text
pub const BUNDLED: &str = "bundled";

/// Source of question bank text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSource {
    /// The bank shipped inside the binary
    Bundled,

    /// A user-supplied INI file
    File(PathBuf),
}

impl BankSource {
    /// Read the full bank text
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so any readable file
    /// produces text for the parser.
    pub fn read(&self) -> Result<String, LookupError> {
        match self {
            BankSource::Bundled => Ok(DataLoader::sample_bank().to_string()),
            BankSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| LookupError::Source {
                    path: path.clone(),
                    source,
                })?;
                debug!(path = %path.display(), bytes = bytes.len(), "read question bank file");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

impl FromStr for BankSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(BUNDLED) {
            Ok(BankSource::Bundled)
        } else {
            Ok(BankSource::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for BankSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankSource::Bundled => write!(f, "{}", BUNDLED),
            BankSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
