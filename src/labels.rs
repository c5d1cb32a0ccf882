// Quiz Lookup Label Tables
// Maps short source codes to display labels at parse time

use crate::types::{FIELD_ANSWER, FIELD_LEVEL, FIELD_OPTION, FIELD_TYPE};

/// Question type codes
pub const TYPE_LABELS: &[(&str, &str)] = &[
    ("dx", "single-choice"),
    ("dxx", "multiple-choice"),
    ("pd", "true/false"),
];

/// Difficulty level codes
pub const LEVEL_LABELS: &[(&str, &str)] = &[
    ("slow", "entry-level"),
    ("medium", "mid-level"),
    ("high", "senior-level"),
    ("engineer", "technician"),
    ("hengineer", "senior technician"),
];

/// Answer codes for true/false questions
pub const ANSWER_LABELS: &[(&str, &str)] = &[("t", "correct"), ("f", "incorrect")];

/// Option text used when a section leaves `option` empty
pub const DEFAULT_TRUE_FALSE_OPTION: &str = "T.correct\nF.incorrect";

/// Label table for a field, if the field has one
pub fn table_for(key: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match key {
        FIELD_TYPE => Some(TYPE_LABELS),
        FIELD_LEVEL => Some(LEVEL_LABELS),
        FIELD_ANSWER => Some(ANSWER_LABELS),
        _ => None,
    }
}

/// Find the label for an exact code in a table
#[inline]
pub fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| *label)
}

/// Translate a raw value for `key` into its display form
///
/// Unknown codes and fields without a table pass through unchanged.
///
/// # Examples
/// ```
/// # use quiz_lookup::labels::translate;
/// assert_eq!(translate("type", "dx"), "single-choice");
/// assert_eq!(translate("type", "essay"), "essay");
/// assert_eq!(translate("question", "dx"), "dx");
/// ```
pub fn translate(key: &str, value: &str) -> String {
    if key == FIELD_OPTION && value.is_empty() {
        return DEFAULT_TRUE_FALSE_OPTION.to_string();
    }

    table_for(key)
        .and_then(|table| lookup(table, value))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
