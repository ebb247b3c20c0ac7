use crate::error::{Result, SymbolsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Pattern-set key.
///
/// Several source languages share one key: TypeScript and JSX use the
/// JavaScript patterns, Kotlin and C# use the Java patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "js", alias = "typescript", alias = "ts")]
    JavaScript,
    #[serde(alias = "py")]
    Python,
    #[serde(alias = "golang")]
    Go,
    #[serde(alias = "rb")]
    Ruby,
    #[serde(alias = "kotlin", alias = "csharp")]
    Java,
    #[serde(alias = "rs")]
    Rust,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::JavaScript,
        Language::Python,
        Language::Go,
        Language::Ruby,
        Language::Java,
        Language::Rust,
    ];

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts" => Some(Language::JavaScript),
            "py" | "pyw" | "pyi" => Some(Language::Python),
            "go" => Some(Language::Go),
            "rb" | "rake" | "gemspec" => Some(Language::Ruby),
            "java" | "kt" | "kts" | "cs" => Some(Language::Java),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get language key as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Go => "go",
            Language::Ruby => "ruby",
            Language::Java => "java",
            Language::Rust => "rust",
        }
    }

    /// File extensions mapped to this key
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"],
            Language::Python => &["py", "pyw", "pyi"],
            Language::Go => &["go"],
            Language::Ruby => &["rb", "rake", "gemspec"],
            Language::Java => &["java", "kt", "kts", "cs"],
            Language::Rust => &["rs"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = SymbolsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" | "typescript" | "ts" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "go" | "golang" => Ok(Language::Go),
            "ruby" | "rb" => Ok(Language::Ruby),
            "java" | "kotlin" | "csharp" | "c#" => Ok(Language::Java),
            "rust" | "rs" => Ok(Language::Rust),
            other => Err(SymbolsError::unsupported_language(other)),
        }
    }
}

/// Resolve the pattern-set key for a file path, `None` when unsupported.
pub fn detect_language(path: impl AsRef<Path>) -> Option<Language> {
    Language::from_path(path)
}
