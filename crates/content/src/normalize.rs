use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

const BOM: char = '\u{FEFF}';

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NormalizeOptions {
    /// Strip trailing whitespace from every line
    pub strip_trailing_whitespace: bool,

    /// Drop a leading byte-order mark
    pub strip_bom: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_trailing_whitespace: false,
            strip_bom: true,
        }
    }
}

/// Text with LF-only line endings and (by default) no leading BOM.
///
/// Only constructed by the normalizer, so every holder can rely on the
/// invariants without re-checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedContent(String);

impl NormalizedContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for NormalizedContent {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize raw file text so line numbering is stable.
///
/// Steps run in a fixed order, each on the previous output:
/// 1. leading BOM removal (when `strip_bom`)
/// 2. `CRLF` → `LF`, then lone `CR` → `LF`
/// 3. trailing whitespace trim per line (when `strip_trailing_whitespace`)
pub fn normalize(raw: &str, options: &NormalizeOptions) -> NormalizedContent {
    let text = if options.strip_bom {
        // A run of BOMs is stripped in one pass so the function stays idempotent.
        raw.trim_start_matches(BOM)
    } else {
        raw
    };

    let mut out = if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    };

    if options.strip_trailing_whitespace {
        out = out
            .split('\n')
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
    }

    NormalizedContent(out)
}

/// Normalize content that may be absent. `None` yields empty content.
pub fn normalize_optional(raw: Option<&str>, options: &NormalizeOptions) -> NormalizedContent {
    match raw {
        Some(raw) => normalize(raw, options),
        None => NormalizedContent::default(),
    }
}

/// Normalize raw bytes. Anything that is not UTF-8 text yields empty content.
pub fn normalize_bytes(raw: &[u8], options: &NormalizeOptions) -> NormalizedContent {
    match std::str::from_utf8(raw) {
        Ok(text) => normalize(text, options),
        Err(err) => {
            log::debug!("Skipping non-UTF-8 content ({} bytes): {err}", raw.len());
            NormalizedContent::default()
        }
    }
}
