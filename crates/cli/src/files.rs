use anyhow::{Context, Result};
use gitgate_graph::SourceFile;
use gitgate_symbols::detect_language;
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

/// Files above this size are left out of the graph
pub const MAX_SOURCE_BYTES: u64 = 1024 * 1024;

/// Include/exclude prefixes plus an optional glob or substring
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    pattern: Option<String>,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String], pattern: Option<&str>) -> Self {
        let clean = |list: &[String]| {
            list.iter()
                .map(|raw| clean_prefix(raw))
                .filter(|prefix| !prefix.is_empty())
                .collect()
        };
        Self {
            include: clean(include),
            exclude: clean(exclude),
            pattern: pattern
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }

    /// `rel_path` is `/` separated and relative to the walk root
    pub fn allows(&self, rel_path: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|p| under_prefix(p, rel_path)) {
            return false;
        }
        if self.exclude.iter().any(|p| under_prefix(p, rel_path)) {
            return false;
        }
        match &self.pattern {
            None => true,
            Some(pattern) if !pattern.contains(['*', '?', '[']) => rel_path.contains(pattern.as_str()),
            Some(pattern) => glob::Pattern::new(pattern)
                .map(|p| p.matches(rel_path))
                .unwrap_or(false),
        }
    }
}

fn clean_prefix(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    let value = value.trim_matches('/');
    if value == "." {
        String::new()
    } else {
        value.to_string()
    }
}

fn under_prefix(prefix: &str, path: &str) -> bool {
    path == prefix
        || (path.starts_with(prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/'))
}

/// Read every source file under `root` in a language with import patterns.
///
/// The walk honours `.gitignore` and skips hidden entries. Output is sorted
/// by path.
pub fn collect_sources(root: &Path, filter: &PathFilter) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let rel_path = relative.to_string_lossy().replace('\\', "/");
        if detect_language(&rel_path).is_none() || !filter.allows(&rel_path) {
            continue;
        }
        if entry.metadata().is_ok_and(|meta| meta.len() > MAX_SOURCE_BYTES) {
            log::debug!("Skipping large file {rel_path}");
            continue;
        }

        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(SourceFile::new(rel_path, String::from_utf8_lossy(&bytes)));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("Collected {} source files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefixes_match_whole_segments() {
        let filter = PathFilter::new(&strings(&["./src/"]), &strings(&["src/gen"]), None);
        assert!(filter.allows("src/lib.rs"));
        assert!(!filter.allows("src2/lib.rs"));
        assert!(!filter.allows("src/gen/out.rs"));
    }

    #[test]
    fn pattern_is_substring_or_glob() {
        let substring = PathFilter::new(&[], &[], Some("util"));
        assert!(substring.allows("lib/util.js"));
        assert!(!substring.allows("lib/main.js"));

        let glob = PathFilter::new(&[], &[], Some("lib/*.py"));
        assert!(glob.allows("lib/a.py"));
        assert!(!glob.allows("lib/a.js"));
    }

    #[test]
    fn blank_entries_are_ignored() {
        let filter = PathFilter::new(&strings(&["", ".", "/"]), &strings(&["./"]), Some("  "));
        assert!(filter.allows("anything/at/all.go"));
    }

    #[test]
    fn collects_known_languages_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.py"), "import b\n").unwrap();
        fs::write(dir.path().join("src/b.py"), "").unwrap();
        fs::write(dir.path().join("README.md"), "# docs").unwrap();

        let files = collect_sources(dir.path(), &PathFilter::default()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/a.py", "src/b.py"]);
    }
}
