use thiserror::Error;

/// Result type for reference operations
pub type Result<T> = std::result::Result<T, ReferenceError>;

/// Errors raised while reading reference strings or configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The string is not `owner/repo:path:start[-end]`
    #[error("Malformed reference '{input}': {reason}")]
    Malformed { input: String, reason: &'static str },

    #[error("Invalid line number '{0}'")]
    InvalidLine(String),

    #[error("Invalid line range: end {end} is before start {start}")]
    InvalidRange { start: usize, end: usize },

    #[error("Invalid web base URL '{0}': expected http(s)://host")]
    InvalidWebBase(String),
}

impl ReferenceError {
    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        Self::Malformed {
            input: input.to_string(),
            reason,
        }
    }
}
