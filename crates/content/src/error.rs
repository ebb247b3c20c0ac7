use thiserror::Error;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors surfaced by the fallible content entry points.
///
/// The infallible variants (`search_content`, `extract_line_range`) swallow
/// these and degrade to empty results.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Search pattern failed to compile
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Patch set rejected before anything was applied
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Reasons a patch set is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("patch #{index}: start_line must be >= 1 (got {start_line})")]
    StartBeforeFirstLine { index: usize, start_line: usize },

    #[error("patch #{index}: end_line {end_line} is before start_line {start_line} - 1")]
    InvertedRange {
        index: usize,
        start_line: usize,
        end_line: usize,
    },

    #[error("patch #{index}: end_line {end_line} exceeds total lines {total_lines}")]
    PastEnd {
        index: usize,
        end_line: usize,
        total_lines: usize,
    },

    #[error("patches #{first} and #{second} overlap")]
    Overlap { first: usize, second: usize },

    #[error("No patches provided")]
    Empty,
}

impl ContentError {
    /// Create an invalid pattern error
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }
}
