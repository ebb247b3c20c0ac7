use serde::{Deserialize, Serialize};

/// One line of normalized content.
///
/// Offsets are byte offsets into the normalized text; `end_offset` points at
/// the terminating LF (or the end of the text for the last line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub line_number: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub text: String,
}

/// Inclusive slice of a document returned by [`extract_line_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    pub lines: Vec<LineRecord>,
    pub total_lines: usize,
    /// Start line after clamping
    pub start_line: usize,
    /// End line after clamping (may be below `start_line` when nothing was returned)
    pub end_line: usize,
}

/// Split normalized content into 1-based line records.
///
/// Empty content has no lines. A trailing LF produces one final empty record,
/// so `n` LF characters always yield `n + 1` records.
pub fn compute_line_map(normalized: &str) -> Vec<LineRecord> {
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    let mut offset = 0usize;
    for (idx, text) in normalized.split('\n').enumerate() {
        let end = offset + text.len();
        records.push(LineRecord {
            line_number: idx + 1,
            start_offset: offset,
            end_offset: end,
            text: text.to_string(),
        });
        offset = end + 1;
    }
    records
}

/// Return lines `start_line..=end_line`, clamped to the document.
///
/// `start_line` is raised to 1, `end_line` defaults to `start_line` and is
/// lowered to the total line count. Out-of-range requests return whatever
/// exists, possibly nothing.
pub fn extract_line_range(content: &str, start_line: i64, end_line: Option<i64>) -> LineRange {
    let all = compute_line_map(content);
    let total_lines = all.len();

    let start = start_line.max(1);
    let end = end_line.unwrap_or(start).min(total_lines as i64);

    let lines = if end >= start {
        let from = (start - 1) as usize;
        let to = end as usize;
        all[from..to].to_vec()
    } else {
        Vec::new()
    };

    LineRange {
        lines,
        total_lines,
        start_line: start as usize,
        end_line: end.max(0) as usize,
    }
}

/// Offset → line lookup over a single document.
///
/// Built once per extraction call; `line_at` is a binary search over the LF
/// positions, so mapping many regex matches back to lines stays cheap.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    newlines: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let newlines = text
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(idx, _)| idx)
            .collect();
        Self { text, newlines }
    }

    /// 1-based line containing byte `offset` (number of LFs before it, plus one)
    pub fn line_at(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }

    /// Number of lines, following the [`compute_line_map`] convention
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.newlines.len() + 1
        }
    }

    /// Text of a 1-based line without its terminator
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let start = if line == 1 {
            0
        } else {
            self.newlines[line - 2] + 1
        };
        let end = self
            .newlines
            .get(line - 1)
            .copied()
            .unwrap_or(self.text.len());
        Some(&self.text[start..end])
    }
}
