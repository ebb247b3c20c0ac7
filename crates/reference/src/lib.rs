//! # Gitgate Reference
//!
//! Shareable, drift-detectable pointers at line ranges of repository files.
//!
//! A [`LineReference`] carries a composite identity string
//! (`owner/repo:path:start[-end]`), the blob SHA captured when it was minted
//! and a permalink. Comparing the captured SHA with the current one tells
//! whether the referenced content changed since.
//!
//! ```rust
//! use gitgate_reference::{build_line_reference, LineReferenceInput};
//!
//! let reference = build_line_reference(&LineReferenceInput {
//!     owner: "acme".into(),
//!     repo: "api".into(),
//!     path: "src/main.rs".into(),
//!     blob_sha: "3f2a".into(),
//!     commit_sha: None,
//!     start_line: 10,
//!     end_line: Some(20),
//! });
//! assert!(reference.github_url.ends_with("#L10-L20"));
//! assert!(reference.check_drift("9b1c").drifted);
//! ```

mod config;
mod drift;
mod error;
mod locator;
mod reference;

pub use config::{ReferenceConfig, DEFAULT_WEB_BASE};
pub use drift::{check_drift, DriftCheck};
pub use error::{ReferenceError, Result};
pub use locator::{parse_ref, RefLocator};
pub use reference::{
    build_line_reference, build_line_reference_with, line_anchor, LineReference,
    LineReferenceInput,
};
