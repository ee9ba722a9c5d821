//! Error types.
//!
//! Only construction can fail: dealing a deck from a bad type set, or
//! loading a bad configuration. Taps the engine refuses are not errors; see
//! [`crate::engine::SelectOutcome`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Error)]
pub enum MatchError {
    /// Empty or repeated card types.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl MatchError {
    /// Whether this error came from input validation (as opposed to config).
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MatchError::InvalidInput(_))
    }
}
