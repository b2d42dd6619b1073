//! Error types for the soundex crate.

use thiserror::Error;

/// Soundex error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoundexError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid Soundex code: {0}")]
    InvalidCode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Soundex operations
pub type SoundexResult<T> = Result<T, SoundexError>;

impl serde::Serialize for SoundexError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
