use crate::error::{ContentError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Compiled-size ceiling for caller supplied patterns.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Options for [`search_content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchOptions {
    /// Treat the pattern as a regular expression instead of a literal
    pub regex: bool,
    pub case_sensitive: bool,
    /// Lines of context captured on each side of a match
    pub context_lines: usize,
    /// Stop after this many matching lines
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            regex: false,
            case_sensitive: true,
            context_lines: 2,
            max_results: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextLine {
    pub line_number: usize,
    pub text: String,
}

/// A single matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub line_number: usize,
    /// 1-based byte column of the first match on the line
    pub column: usize,
    pub line: String,
    pub match_text: String,
    pub context_before: Vec<ContextLine>,
    pub context_after: Vec<ContextLine>,
}

/// Matches of one search plus whether the scan stopped at `max_results`
/// with more matching lines left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub matches: Vec<SearchMatch>,
    pub truncated: bool,
}

/// Compile a search pattern (literal or regex) honoring case sensitivity.
pub fn build_search_regex(pattern: &str, options: &SearchOptions) -> Result<Regex> {
    let source = if options.regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };

    RegexBuilder::new(&source)
        .case_insensitive(!options.case_sensitive)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| ContentError::invalid_pattern(e.to_string()))
}

/// Line-by-line search returning at most one match per line.
///
/// A malformed regex produces zero matches rather than an error; use
/// [`try_search_content`] to tell the two apart.
pub fn search_content(content: &str, pattern: &str, options: &SearchOptions) -> Vec<SearchMatch> {
    match try_search_content(content, pattern, options) {
        Ok(results) => results.matches,
        Err(e) => {
            log::debug!("search pattern {pattern:?} rejected: {e}");
            Vec::new()
        }
    }
}

/// Same as [`search_content`] but reports an invalid pattern.
pub fn try_search_content(
    content: &str,
    pattern: &str,
    options: &SearchOptions,
) -> Result<SearchResults> {
    let re = build_search_regex(pattern, options)?;

    if content.is_empty() {
        return Ok(SearchResults::default());
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let mut matches = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(found) = re.find(line) else {
            continue;
        };
        if matches.len() >= options.max_results {
            return Ok(SearchResults {
                matches,
                truncated: true,
            });
        }

        let before_start = idx.saturating_sub(options.context_lines);
        let after_end = (idx + options.context_lines).min(lines.len() - 1);

        matches.push(SearchMatch {
            line_number: idx + 1,
            column: found.start() + 1,
            line: (*line).to_string(),
            match_text: found.as_str().to_string(),
            context_before: context_slice(&lines, before_start, idx),
            context_after: context_slice(&lines, idx + 1, after_end + 1),
        });
    }

    Ok(SearchResults {
        matches,
        truncated: false,
    })
}

fn context_slice(lines: &[&str], from: usize, to: usize) -> Vec<ContextLine> {
    if from >= to {
        return Vec::new();
    }
    lines[from..to]
        .iter()
        .enumerate()
        .map(|(offset, text)| ContextLine {
            line_number: from + offset + 1,
            text: (*text).to_string(),
        })
        .collect()
}
