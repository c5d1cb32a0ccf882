// Quiz Lookup INI Parser
// Converts INI question bank text into a QuestionBank

use crate::bank::QuestionBank;
use crate::labels;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Any line ending style: `\r\n`, `\n` or a lone `\r`
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"));

/// `[name]` alone on a (trimmed) line; the name cannot contain `]`
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]$").expect("section header pattern is valid"));

/// `key = value`, split on the first `=`
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+?)\s*=\s*(.*)$").expect("key/value pattern is valid"));

/// Lines starting with this (after trimming) are comments
const COMMENT_PREFIX: char = ';';

/// Parse INI question bank text
///
/// # Format
/// - `[id]` opens a section; re-opening an id starts it over empty
/// - `key = value` assigns into the current section (last one wins)
/// - Blank lines and `;` comments are skipped
/// - Lines before the first header and malformed lines are ignored
///
/// `type`, `level` and `answer` codes are replaced by their labels, and an
/// empty `option` gets the default true/false option text. Never fails.
///
/// # Examples
/// ```
/// # use quiz_lookup::parser::parse_ini;
/// let bank = parse_ini("[Q1]\ntype = dx\nanswer = t\n");
/// let record = bank.get("Q1").unwrap();
/// assert_eq!(record.question_type(), Some("single-choice"));
/// assert_eq!(record.answer(), Some("correct"));
/// ```
pub fn parse_ini(text: &str) -> QuestionBank {
    let mut bank = QuestionBank::new();
    let mut current: Option<String> = None;
    let mut skipped = 0usize;

    for line in LINE_BREAK.split(text) {
        let line = line.trim();

        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        if let Some(caps) = SECTION_HEADER.captures(line) {
            let id = &caps[1];
            bank.open_section(id);
            current = Some(id.to_string());
            continue;
        }

        let Some(section) = current.as_deref() else {
            skipped += 1;
            continue;
        };

        match KEY_VALUE.captures(line) {
            Some(caps) => {
                let key = caps[1].trim();
                let value = labels::translate(key, caps[2].trim());
                bank.assign(section, key, value);
            }
            None => skipped += 1,
        }
    }

    debug!(sections = bank.len(), skipped, "parsed question bank");
    bank
}
