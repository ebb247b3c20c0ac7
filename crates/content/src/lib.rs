//! # Gitgate Content
//!
//! Deterministic line numbering for file content fetched from a remote
//! repository.
//!
//! ## Pipeline
//!
//! ```text
//! raw text
//!     │
//!     ├──> Normalizer (BOM strip, CRLF/CR → LF, optional trailing trim)
//!     │
//!     ├──> Line Map (1-based records with byte offsets)
//!     │      ├─ range extraction (clamped, never errors)
//!     │      └─ line search (first match per line + context)
//!     │
//!     └──> Line patches (bottom-up replacement of line ranges)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gitgate_content::{compute_line_map, normalize, NormalizeOptions};
//!
//! let content = normalize("line1\r\nline2\r", &NormalizeOptions::default());
//! assert_eq!(content.as_str(), "line1\nline2\n");
//!
//! let lines = compute_line_map(&content);
//! assert_eq!(lines.len(), 3);
//! assert_eq!(lines[1].text, "line2");
//! ```

mod error;
mod line_map;
mod normalize;
mod patch;
mod search;

pub use error::{ContentError, PatchError, Result};
pub use line_map::{compute_line_map, extract_line_range, LineIndex, LineRange, LineRecord};
pub use normalize::{normalize, normalize_bytes, normalize_optional, NormalizeOptions, NormalizedContent};
pub use patch::{apply_line_patches, LinePatch, PatchOutcome};
pub use search::{
    build_search_regex, search_content, try_search_content, ContextLine, SearchMatch,
    SearchOptions, SearchResults,
};
