//! Error type for style and bar names

use thiserror::Error;

/// A style or bar type name that is not one of the known choices
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseChoiceError {
    /// What was being parsed ("style", "bar type")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Accepted names, comma separated
    pub expected: &'static str,
}

impl ParseChoiceError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
