use serde::{Deserialize, Serialize};

/// Outcome of comparing a captured blob SHA with the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftCheck {
    pub drifted: bool,
    pub reference_sha: String,
    pub current_sha: String,
}

/// Plain equality; fetching `current_sha` is the caller's job.
pub fn check_drift(reference_sha: &str, current_sha: &str) -> DriftCheck {
    DriftCheck {
        drifted: reference_sha != current_sha,
        reference_sha: reference_sha.to_string(),
        current_sha: current_sha.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift() {
        assert!(!check_drift("abc", "abc").drifted);
        let check = check_drift("abc", "def");
        assert!(check.drifted);
        assert_eq!(check.reference_sha, "abc");
        assert_eq!(check.current_sha, "def");
    }
}
