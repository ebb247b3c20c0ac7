use crate::error::{ReferenceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed form of a `ref` string: `owner/repo:path:start[-end]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefLocator {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl fmt::Display for RefLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}:{}", self.owner, self.repo, self.path, self.start_line)?;
        if self.end_line > self.start_line {
            write!(f, "-{}", self.end_line)?;
        }
        Ok(())
    }
}

impl FromStr for RefLocator {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self> {
        parse_ref(s)
    }
}

/// Read a `ref` string back into its parts.
///
/// The path may itself contain `:`; the repository ends at the first colon
/// and the line range starts after the last one.
///
/// ```
/// use gitgate_reference::parse_ref;
///
/// let locator = parse_ref("acme/api:src/main.rs:10-20").unwrap();
/// assert_eq!(locator.path, "src/main.rs");
/// assert_eq!((locator.start_line, locator.end_line), (10, 20));
/// ```
pub fn parse_ref(input: &str) -> Result<RefLocator> {
    let (repository, rest) = input
        .split_once(':')
        .ok_or_else(|| ReferenceError::malformed(input, "missing ':' separators"))?;
    let (path, lines) = rest
        .rsplit_once(':')
        .ok_or_else(|| ReferenceError::malformed(input, "missing line range"))?;

    let (owner, repo) = repository
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
        .ok_or_else(|| ReferenceError::malformed(input, "expected owner/repo"))?;
    if path.is_empty() {
        return Err(ReferenceError::malformed(input, "empty path"));
    }

    let (start_line, end_line) = match lines.split_once('-') {
        Some((start, end)) => (parse_line(start)?, parse_line(end)?),
        None => {
            let line = parse_line(lines)?;
            (line, line)
        }
    };
    if end_line < start_line {
        return Err(ReferenceError::InvalidRange {
            start: start_line,
            end: end_line,
        });
    }

    Ok(RefLocator {
        owner: owner.to_string(),
        repo: repo.to_string(),
        path: path.to_string(),
        start_line,
        end_line,
    })
}

fn parse_line(value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(line) if line >= 1 => Ok(line),
        _ => Err(ReferenceError::InvalidLine(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_and_range() {
        let single = parse_ref("acme/api:README.md:7").unwrap();
        assert_eq!((single.start_line, single.end_line), (7, 7));
        assert_eq!(single.to_string(), "acme/api:README.md:7");

        let range: RefLocator = "acme/api:a:b/c.txt:3-9".parse().unwrap();
        assert_eq!(range.path, "a:b/c.txt");
        assert_eq!(range.to_string(), "acme/api:a:b/c.txt:3-9");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(parse_ref("acme/api"), Err(ReferenceError::Malformed { .. })));
        assert!(matches!(parse_ref("acme:x.rs:1"), Err(ReferenceError::Malformed { .. })));
        assert!(matches!(parse_ref("a/b/c:x.rs:1"), Err(ReferenceError::Malformed { .. })));
        assert!(matches!(parse_ref("acme/api::1"), Err(ReferenceError::Malformed { .. })));
        assert_eq!(
            parse_ref("acme/api:x.rs:0"),
            Err(ReferenceError::InvalidLine("0".into()))
        );
        assert_eq!(
            parse_ref("acme/api:x.rs:abc"),
            Err(ReferenceError::InvalidLine("abc".into()))
        );
        assert_eq!(
            parse_ref("acme/api:x.rs:9-3"),
            Err(ReferenceError::InvalidRange { start: 9, end: 3 })
        );
    }
}
