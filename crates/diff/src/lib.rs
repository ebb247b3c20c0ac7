//! # Gitgate Diff
//!
//! Line diff between two versions of a file, bounded in cost.
//!
//! ```text
//! source?, target?
//!     │
//!     ├─ missing side(s)        → every line of the other side added/removed
//!     ├─ equal after normalize  → identical
//!     ├─ > max_lcs_lines        → set-based summary (truncated, note)
//!     └─ otherwise              → LCS table + pointer walk
//!                                   (empty LCS past max_lcs_cells)
//! ```
//!
//! ```rust
//! use gitgate_diff::{compute_line_diff, DiffStatus};
//!
//! let diff = compute_line_diff(Some("a\nb\n"), Some("a\nc\n"));
//! assert_eq!(diff.status, DiffStatus::Different);
//! assert_eq!((diff.added, diff.removed), (1, 1));
//! ```

mod engine;
mod error;
mod limits;
mod types;

pub use engine::{compute_line_diff, compute_line_diff_with};
pub use error::{DiffError, Result};
pub use limits::DiffLimits;
pub use types::{DiffLine, DiffOp, DiffResult, DiffStatus};
