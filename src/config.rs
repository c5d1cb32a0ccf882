// Quiz Lookup Configuration
// Environment driven settings with logged defaults

use crate::source::{BankSource, BUNDLED};
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Selects the question bank: `bundled` or a path to an INI file
pub const SOURCE_VAR: &str = "QUIZ_SOURCE";
/// Path of the history JSON file
pub const HISTORY_PATH_VAR: &str = "QUIZ_HISTORY_PATH";

const DEFAULT_HISTORY_PATH: &str = ".quiz_history.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: BankSource,
    pub history_path: PathBuf,
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            source: try_load(&lookup, SOURCE_VAR, BUNDLED),
            history_path: try_load(&lookup, HISTORY_PATH_VAR, DEFAULT_HISTORY_PATH),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> T
where
    T: FromStr<Err = Infallible>,
{
    let value = lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        });

    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.source, BankSource::Bundled);
        assert_eq!(config.history_path, PathBuf::from(DEFAULT_HISTORY_PATH));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(|key| match key {
            SOURCE_VAR => Some("banks/exam.ini".to_string()),
            HISTORY_PATH_VAR => Some("/tmp/history.json".to_string()),
            _ => None,
        });

        assert_eq!(config.source, BankSource::File("banks/exam.ini".into()));
        assert_eq!(config.history_path, PathBuf::from("/tmp/history.json"));
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = Config::from_lookup(|key| (key == SOURCE_VAR).then(|| "  ".to_string()));
        assert_eq!(config.source, BankSource::Bundled);
    }
}
