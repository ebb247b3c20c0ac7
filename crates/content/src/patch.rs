use crate::error::PatchError;
use crate::line_map::compute_line_map;
use crate::normalize::{normalize, NormalizeOptions};
use serde::{Deserialize, Serialize};

/// Replace lines `start_line..=end_line` with `replacement`.
///
/// `end_line == start_line - 1` inserts before `start_line` without removing
/// anything. An empty `replacement` deletes the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePatch {
    pub start_line: usize,
    pub end_line: usize,
    #[serde(default)]
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchOutcome {
    pub content: String,
    pub total_lines: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub applied_patches: usize,
}

/// Apply a set of line patches whose line numbers all refer to `content`.
///
/// Every patch is validated before any is applied; they are then applied
/// from the bottom of the file upwards so earlier edits never shift later
/// ones.
pub fn apply_line_patches(content: &str, patches: &[LinePatch]) -> Result<PatchOutcome, PatchError> {
    if patches.is_empty() {
        return Err(PatchError::Empty);
    }

    let mut lines: Vec<String> = compute_line_map(content)
        .into_iter()
        .map(|record| record.text)
        .collect();
    let total_lines = lines.len();

    for (index, patch) in patches.iter().enumerate() {
        validate(index, patch, total_lines)?;
    }

    let mut order: Vec<usize> = (0..patches.len()).collect();
    order.sort_by_key(|&idx| (patches[idx].start_line, patches[idx].end_line));
    for pair in order.windows(2) {
        let (a, b) = (&patches[pair[0]], &patches[pair[1]]);
        // Two insertions at the same spot are ambiguous; a range overlapping another is a conflict.
        if b.start_line <= a.end_line || (a.start_line == b.start_line && is_insert(a) && is_insert(b)) {
            return Err(PatchError::Overlap {
                first: pair[0],
                second: pair[1],
            });
        }
    }

    let options = NormalizeOptions::default();
    let mut lines_added = 0;
    let mut lines_removed = 0;

    for &idx in order.iter().rev() {
        let patch = &patches[idx];
        let replacement = normalize(&patch.replacement, &options);
        let new_lines: Vec<String> = if replacement.is_empty() {
            Vec::new()
        } else {
            replacement.split('\n').map(str::to_string).collect()
        };

        let from = patch.start_line - 1;
        let to = patch.end_line;
        lines_removed += to - from;
        lines_added += new_lines.len();
        lines.splice(from..to, new_lines);
    }

    Ok(PatchOutcome {
        total_lines: lines.len(),
        content: lines.join("\n"),
        lines_added,
        lines_removed,
        applied_patches: patches.len(),
    })
}

fn is_insert(patch: &LinePatch) -> bool {
    patch.start_line >= 1 && patch.end_line == patch.start_line - 1
}

fn validate(index: usize, patch: &LinePatch, total_lines: usize) -> Result<(), PatchError> {
    if patch.start_line == 0 {
        return Err(PatchError::StartBeforeFirstLine {
            index,
            start_line: patch.start_line,
        });
    }
    // start_line >= 1 here
    if patch.end_line < patch.start_line - 1 {
        return Err(PatchError::InvertedRange {
            index,
            start_line: patch.start_line,
            end_line: patch.end_line,
        });
    }
    // Insertion right after the last line is allowed (start = total + 1).
    if patch.end_line > total_lines {
        return Err(PatchError::PastEnd {
            index,
            end_line: patch.end_line,
            total_lines,
        });
    }
    Ok(())
}
