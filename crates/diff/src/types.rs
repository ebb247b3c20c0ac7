use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Identical,
    Different,
    SourceMissing,
    TargetMissing,
    BothMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOp {
    Add,
    Remove,
}

/// One changed line. `line_num` is 1-based in the source for removals and
/// in the target for additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub op: DiffOp,
    pub line_num: usize,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub status: DiffStatus,
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// Changed lines, capped
    pub lines: Vec<DiffLine>,
    /// Set when `lines` was capped or the counts are a set-based estimate
    pub truncated: bool,
    /// `added + removed`, present only when `lines` was capped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_changes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiffResult {
    pub(crate) fn empty(status: DiffStatus) -> Self {
        Self {
            status,
            added: 0,
            removed: 0,
            unchanged: 0,
            lines: Vec::new(),
            truncated: false,
            total_changes: None,
            note: None,
        }
    }
}
