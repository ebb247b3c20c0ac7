use thiserror::Error;

/// Result type for pattern table operations
pub type Result<T> = std::result::Result<T, SymbolsError>;

/// Errors that can occur while assembling pattern tables
#[derive(Error, Debug)]
pub enum SymbolsError {
    /// A pattern in a table failed to compile
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A capture group referenced by a pattern does not exist
    #[error("Pattern {pattern:?} has no capture group {group}")]
    MissingGroup { pattern: String, group: usize },

    /// Unsupported language key
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl SymbolsError {
    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }
}
