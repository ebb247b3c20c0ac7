use crate::limits::DiffLimits;
use crate::types::{DiffLine, DiffOp, DiffResult, DiffStatus};
use gitgate_content::{normalize, NormalizeOptions};
use std::collections::HashSet;

/// Diff two blobs with the default [`DiffLimits`]
pub fn compute_line_diff(source: Option<&str>, target: Option<&str>) -> DiffResult {
    compute_line_diff_with(source, target, &DiffLimits::default())
}

/// Line diff of `source` against `target`.
///
/// `None` stands for a file that does not exist on that side. Both sides are
/// normalized first, so line ending differences alone never count as
/// changes.
pub fn compute_line_diff_with(
    source: Option<&str>,
    target: Option<&str>,
    limits: &DiffLimits,
) -> DiffResult {
    let options = NormalizeOptions::default();
    let source = source.map(|text| normalize(text, &options));
    let target = target.map(|text| normalize(text, &options));

    match (source.as_deref(), target.as_deref()) {
        (None, None) => DiffResult::empty(DiffStatus::BothMissing),
        (None, Some(target)) => {
            let lines = split_lines(target);
            let mut collector = Collector::new(limits.max_output_lines);
            for (idx, line) in lines.iter().enumerate() {
                collector.push(DiffOp::Add, idx + 1, line);
            }
            collector.finish(DiffStatus::SourceMissing, 0)
        }
        (Some(source), None) => {
            let lines = split_lines(source);
            let mut collector = Collector::new(limits.max_output_lines);
            for (idx, line) in lines.iter().enumerate() {
                collector.push(DiffOp::Remove, idx + 1, line);
            }
            collector.finish(DiffStatus::TargetMissing, 0)
        }
        (Some(source), Some(target)) if source == target => DiffResult {
            unchanged: split_lines(source).len(),
            ..DiffResult::empty(DiffStatus::Identical)
        },
        (Some(source), Some(target)) => {
            let a = split_lines(source);
            let b = split_lines(target);
            if a.len() > limits.max_lcs_lines || b.len() > limits.max_lcs_lines {
                set_summary(&a, &b, limits)
            } else {
                lcs_diff(&a, &b, limits)
            }
        }
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Accumulates changed lines up to the output cap
struct Collector {
    cap: usize,
    lines: Vec<DiffLine>,
    added: usize,
    removed: usize,
}

impl Collector {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            lines: Vec::new(),
            added: 0,
            removed: 0,
        }
    }

    fn push(&mut self, op: DiffOp, line_num: usize, line: &str) {
        match op {
            DiffOp::Add => self.added += 1,
            DiffOp::Remove => self.removed += 1,
        }
        if self.lines.len() < self.cap {
            self.lines.push(DiffLine {
                op,
                line_num,
                line: line.to_string(),
            });
        }
    }

    fn finish(self, status: DiffStatus, unchanged: usize) -> DiffResult {
        let total = self.added + self.removed;
        let truncated = total > self.lines.len();
        DiffResult {
            status,
            added: self.added,
            removed: self.removed,
            unchanged,
            lines: self.lines,
            truncated,
            total_changes: truncated.then_some(total),
            note: None,
        }
    }
}

/// Suffix LCS lengths: `table[i * (n + 1) + j]` is the LCS of `a[i..]` and
/// `b[j..]`. `None` when the table would exceed `max_cells`.
fn lcs_table(a: &[&str], b: &[&str], max_cells: usize) -> Option<Vec<u32>> {
    let (m, n) = (a.len(), b.len());
    if m.saturating_mul(n) > max_cells {
        return None;
    }
    let width = n + 1;
    let mut table = vec![0u32; (m + 1) * width];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            table[i * width + j] = if a[i] == b[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }
    Some(table)
}

fn lcs_diff(a: &[&str], b: &[&str], limits: &DiffLimits) -> DiffResult {
    let mut collector = Collector::new(limits.max_output_lines);
    let mut unchanged = 0;

    let table = lcs_table(a, b, limits.max_lcs_cells);
    if table.is_none() {
        log::debug!(
            "LCS table of {}x{} lines exceeds {} cells, reporting every line as changed",
            a.len(),
            b.len(),
            limits.max_lcs_cells
        );
    }

    let width = b.len() + 1;
    let (mut i, mut j) = (0, 0);
    if let Some(table) = &table {
        while i < a.len() && j < b.len() {
            if a[i] == b[j] {
                unchanged += 1;
                i += 1;
                j += 1;
            } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
                collector.push(DiffOp::Remove, i + 1, a[i]);
                i += 1;
            } else {
                collector.push(DiffOp::Add, j + 1, b[j]);
                j += 1;
            }
        }
    }
    for (idx, line) in a.iter().enumerate().skip(i) {
        collector.push(DiffOp::Remove, idx + 1, line);
    }
    for (idx, line) in b.iter().enumerate().skip(j) {
        collector.push(DiffOp::Add, idx + 1, line);
    }

    collector.finish(DiffStatus::Different, unchanged)
}

/// Order-insensitive estimate for inputs too large for LCS.
///
/// A line counts as shared when the other side contains it anywhere.
fn set_summary(a: &[&str], b: &[&str], limits: &DiffLimits) -> DiffResult {
    let in_a: HashSet<&str> = a.iter().copied().collect();
    let in_b: HashSet<&str> = b.iter().copied().collect();

    let removed = a.iter().filter(|line| !in_b.contains(*line)).count();
    let added = b.iter().filter(|line| !in_a.contains(*line)).count();
    let unchanged = a.len() - removed;

    DiffResult {
        added,
        removed,
        unchanged,
        truncated: true,
        note: Some(format!(
            "Inputs of {} and {} lines exceed the {}-line limit; counts are set-based and ignore line order",
            a.len(),
            b.len(),
            limits.max_lcs_lines
        )),
        ..DiffResult::empty(DiffStatus::Different)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ops(result: &DiffResult) -> Vec<(DiffOp, usize, &str)> {
        result
            .lines
            .iter()
            .map(|l| (l.op, l.line_num, l.line.as_str()))
            .collect()
    }

    #[test]
    fn test_identity() {
        for text in ["", "a", "a\nb\n", "x\r\ny"] {
            let result = compute_line_diff(Some(text), Some(text));
            assert_eq!(result.status, DiffStatus::Identical);
            assert_eq!((result.added, result.removed), (0, 0));
            assert!(result.lines.is_empty());
        }
    }

    #[test]
    fn test_line_endings_alone_are_identical() {
        let result = compute_line_diff(Some("a\r\nb\r\n"), Some("a\nb\n"));
        assert_eq!(result.status, DiffStatus::Identical);
        assert_eq!(result.unchanged, 3);
    }

    #[test]
    fn test_missing_sides() {
        assert_eq!(compute_line_diff(None, None).status, DiffStatus::BothMissing);

        let created = compute_line_diff(None, Some("a\nb"));
        assert_eq!(created.status, DiffStatus::SourceMissing);
        assert_eq!(created.added, 2);
        assert_eq!(ops(&created), vec![(DiffOp::Add, 1, "a"), (DiffOp::Add, 2, "b")]);

        let deleted = compute_line_diff(Some("a\nb"), None);
        assert_eq!(deleted.status, DiffStatus::TargetMissing);
        assert_eq!(deleted.removed, 2);
        assert_eq!(deleted.lines[1].op, DiffOp::Remove);
    }

    #[test]
    fn test_lcs_walk() {
        let result = compute_line_diff(Some("a\nb\nc\nd"), Some("a\nc\nd\ne"));
        assert_eq!(result.status, DiffStatus::Different);
        assert_eq!((result.added, result.removed, result.unchanged), (1, 1, 3));
        assert_eq!(
            ops(&result),
            vec![(DiffOp::Remove, 2, "b"), (DiffOp::Add, 4, "e")]
        );
        assert!(!result.truncated);
        assert_eq!(result.total_changes, None);
    }

    #[test]
    fn test_replaced_line_removes_before_adding() {
        let result = compute_line_diff(Some("fn a() {}\nold\nend"), Some("fn a() {}\nnew\nend"));
        assert_eq!(
            ops(&result),
            vec![(DiffOp::Remove, 2, "old"), (DiffOp::Add, 2, "new")]
        );
    }

    #[test]
    fn test_output_cap() {
        let source: String = (0..300).map(|i| format!("s{i}\n")).collect();
        let target: String = (0..300).map(|i| format!("t{i}\n")).collect();
        let result = compute_line_diff(Some(&source), Some(&target));

        assert_eq!(result.lines.len(), 200);
        assert!(result.truncated);
        assert_eq!(result.total_changes, Some(600));
        // trailing empty line is shared
        assert_eq!(result.unchanged, 1);
    }

    #[test]
    fn test_cell_ceiling_reports_everything_changed() {
        let limits = DiffLimits {
            max_lcs_cells: 4,
            ..DiffLimits::default()
        };
        let result = compute_line_diff_with(Some("a\nb\nc"), Some("a\nb\nd"), &limits);
        assert_eq!((result.added, result.removed, result.unchanged), (3, 3, 0));
        assert_eq!(result.lines[0], DiffLine { op: DiffOp::Remove, line_num: 1, line: "a".into() });
    }

    #[test]
    fn test_set_summary_for_large_inputs() {
        let source: String = (0..600).map(|i| format!("line {i}\n")).collect();
        let target: String = (0..600).rev().map(|i| format!("line {i}\n")).collect::<String>() + "extra\n";
        let result = compute_line_diff(Some(&source), Some(&target));

        assert_eq!(result.status, DiffStatus::Different);
        assert!(result.truncated);
        assert!(result.note.is_some());
        assert!(result.lines.is_empty());
        // Order is ignored: only the new line registers.
        assert_eq!((result.added, result.removed), (1, 0));
        assert_eq!(result.unchanged, 601);
    }
}
