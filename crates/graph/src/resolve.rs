//! Import path arithmetic.
//!
//! Everything here is string manipulation over `/` separated paths; the
//! filesystem is never consulted.

use gitgate_symbols::{is_relative_module, Language};
use std::collections::{HashMap, HashSet};

/// Names tried when an import points at a directory
pub const INDEX_NAMES: &[&str] = &["index", "__init__", "mod"];

/// Extensions appended to an unresolved import, in order
pub const RESOLVE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs", ".py", ".rb", ".go", ".rs", ".java",
];

/// Resolve `import` against the directory of `current_file`.
///
/// Non-relative imports are returned unchanged. A leading `/` is taken from
/// the repository root. `..` above the root is dropped.
///
/// ```
/// use gitgate_graph::resolve_import_path;
///
/// assert_eq!(resolve_import_path("../lib/util", "src/app/main.js"), "src/lib/util");
/// assert_eq!(resolve_import_path("react", "src/app/main.js"), "react");
/// ```
pub fn resolve_import_path(import: &str, current_file: &str) -> String {
    if !is_relative_module(import) {
        return import.to_string();
    }

    let mut segments: Vec<&str> = if import.starts_with('/') {
        Vec::new()
    } else {
        let mut dir: Vec<&str> = current_file.split('/').filter(|s| !s.is_empty()).collect();
        dir.pop();
        dir
    };

    for segment in import.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Turn a language-specific module name into a path-like import.
///
/// Only Python needs this: `.pkg.mod` becomes `./pkg/mod`, `..pkg` becomes
/// `../pkg` and `pkg.mod` becomes `pkg/mod`.
pub fn module_to_path(language: Option<Language>, module: &str) -> String {
    if language != Some(Language::Python) {
        return module.to_string();
    }

    let dots = module.chars().take_while(|c| *c == '.').count();
    let rest = module[dots..].replace('.', "/");
    match dots {
        0 => rest,
        1 if rest.is_empty() => ".".to_string(),
        1 => format!("./{rest}"),
        n => format!("{}{}", "../".repeat(n - 1), rest),
    }
}

/// Drop the extension of the final path segment, if any
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Known file paths of one graph build
#[derive(Debug, Default)]
pub struct FileIndex {
    paths: HashSet<String>,
    /// extension-less path → first file with that stem
    stems: HashMap<String, String>,
}

impl FileIndex {
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = Self::default();
        for path in paths {
            index.insert(path);
        }
        index
    }

    pub fn insert(&mut self, path: &str) {
        self.paths.insert(path.to_string());
        self.stems
            .entry(strip_extension(path).to_string())
            .or_insert_with(|| path.to_string());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Find the scanned file a resolved import refers to.
    ///
    /// Tried in order: the exact path, a file with the same path minus
    /// extension, a directory index file, then each of
    /// [`RESOLVE_EXTENSIONS`] appended.
    /// An empty candidate is the repository root and only matches index files.
    pub fn resolve(&self, candidate: &str) -> Option<&str> {
        if candidate.is_empty() {
            return INDEX_NAMES.iter().find_map(|name| self.stems.get(*name)).map(String::as_str);
        }
        if let Some(path) = self.paths.get(candidate) {
            return Some(path.as_str());
        }
        if let Some(path) = self.stems.get(strip_extension(candidate)) {
            return Some(path.as_str());
        }
        for name in INDEX_NAMES {
            let index = format!("{candidate}/{name}");
            if let Some(path) = self.paths.get(&index).or_else(|| self.stems.get(&index)) {
                return Some(path.as_str());
            }
        }
        RESOLVE_EXTENSIONS
            .iter()
            .find_map(|ext| self.paths.get(&format!("{candidate}{ext}")))
            .map(String::as_str)
    }
}
