use crate::config::ReferenceConfig;
use crate::drift::{check_drift, DriftCheck};
use crate::locator::RefLocator;
use serde::{Deserialize, Serialize};

/// What a caller knows when minting a reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReferenceInput {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub blob_sha: String,
    #[serde(default)]
    pub commit_sha: Option<String>,
    /// Values below 1 are clamped
    pub start_line: i64,
    /// Defaults to `start_line`, raised to it when lower
    #[serde(default)]
    pub end_line: Option<i64>,
}

/// Immutable pointer at a line range of one blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReference {
    /// `owner/repo:path:start[-end]`
    #[serde(rename = "ref")]
    pub reference: String,
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub blob_sha: String,
    pub commit_sha: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub github_url: String,
}

impl LineReference {
    /// Compare the captured blob SHA with the one upstream reports now
    pub fn check_drift(&self, current_sha: &str) -> DriftCheck {
        check_drift(&self.blob_sha, current_sha)
    }

    pub fn locator(&self) -> RefLocator {
        RefLocator {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            path: self.path.clone(),
            start_line: self.start_line,
            end_line: self.end_line,
        }
    }
}

/// Build a reference against github.com
pub fn build_line_reference(input: &LineReferenceInput) -> LineReference {
    build_line_reference_with(input, &ReferenceConfig::default())
}

/// Build a reference with an explicit web host.
///
/// Pure: the `ref` string and URL depend only on the input. The URL pins
/// the commit when one is known, since a blob SHA does not identify a tree.
pub fn build_line_reference_with(input: &LineReferenceInput, config: &ReferenceConfig) -> LineReference {
    let start_line = input.start_line.max(1) as usize;
    let end_line = input
        .end_line
        .map_or(start_line, |end| (end.max(1) as usize).max(start_line));

    let locator = RefLocator {
        owner: input.owner.clone(),
        repo: input.repo.clone(),
        path: input.path.clone(),
        start_line,
        end_line,
    };

    let revision = input
        .commit_sha
        .as_deref()
        .filter(|sha| !sha.is_empty())
        .unwrap_or(&input.blob_sha);

    let github_url = format!(
        "{}/{}/{}/blob/{}/{}#{}",
        config.base(),
        input.owner,
        input.repo,
        revision,
        encode_path(&input.path),
        line_anchor(start_line, end_line)
    );

    LineReference {
        reference: locator.to_string(),
        owner: input.owner.clone(),
        repo: input.repo.clone(),
        path: input.path.clone(),
        blob_sha: input.blob_sha.clone(),
        commit_sha: input.commit_sha.clone(),
        start_line,
        end_line,
        github_url,
    }
}

/// `L{s}` for one line, `L{s}-L{e}` for a range
pub fn line_anchor(start_line: usize, end_line: usize) -> String {
    if end_line > start_line {
        format!("L{start_line}-L{end_line}")
    } else {
        format!("L{start_line}")
    }
}

/// Percent-encode each path segment, keeping the separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(start_line: i64, end_line: Option<i64>) -> LineReferenceInput {
        LineReferenceInput {
            owner: "acme".into(),
            repo: "api".into(),
            path: "src/lib.rs".into(),
            blob_sha: "b10b".into(),
            commit_sha: None,
            start_line,
            end_line,
        }
    }

    #[test]
    fn test_range_reference() {
        let reference = build_line_reference(&input(10, Some(20)));
        assert_eq!(reference.reference, "acme/api:src/lib.rs:10-20");
        assert_eq!(
            reference.github_url,
            "https://github.com/acme/api/blob/b10b/src/lib.rs#L10-L20"
        );
    }

    #[test]
    fn test_single_line_has_no_range_anchor() {
        let reference = build_line_reference(&input(42, None));
        assert_eq!(reference.reference, "acme/api:src/lib.rs:42");
        assert!(reference.github_url.ends_with("#L42"));
        assert!(!reference.github_url.contains("-L"));
        assert_eq!(reference.end_line, 42);
    }

    #[test]
    fn test_clamping() {
        let reference = build_line_reference(&input(-3, Some(-9)));
        assert_eq!((reference.start_line, reference.end_line), (1, 1));

        let reference = build_line_reference(&input(8, Some(2)));
        assert_eq!((reference.start_line, reference.end_line), (8, 8));
        assert!(reference.github_url.ends_with("#L8"));
    }

    #[test]
    fn test_commit_sha_preferred_and_path_encoded() {
        let mut request = input(1, Some(2));
        request.commit_sha = Some("c0ffee".into());
        request.path = "docs/a b#1.md".into();

        let reference = build_line_reference_with(
            &request,
            &ReferenceConfig {
                web_base: "https://git.corp.example/".into(),
            },
        );
        assert_eq!(
            reference.github_url,
            "https://git.corp.example/acme/api/blob/c0ffee/docs/a%20b%231.md#L1-L2"
        );
        assert_eq!(reference.blob_sha, "b10b");

        request.commit_sha = Some(String::new());
        assert!(build_line_reference(&request).github_url.contains("/blob/b10b/"));
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(build_line_reference(&input(3, None))).unwrap();
        assert_eq!(value["ref"], "acme/api:src/lib.rs:3");
        assert_eq!(value["blobSha"], "b10b");
        assert!(value["commitSha"].is_null());
        assert_eq!(value["githubUrl"], "https://github.com/acme/api/blob/b10b/src/lib.rs#L3");
    }
}
