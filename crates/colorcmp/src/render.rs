//! Line-level block diff: hunks with collapsed context.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce an edit script
//! between two blocks of text, grouped into hunks that keep a few unchanged
//! lines around each change. Hunks are joined by an [`ELISION_MARKER`] line.
//!
//! Two change clusters share a hunk while the run of unchanged lines between
//! them is at most twice the context budget (the trailing context of one plus
//! the leading context of the next); longer runs are elided.

use std::borrow::Cow;

use similar::{ChangeTag, TextDiff};

/// Line separating two non-adjacent hunks.
pub const ELISION_MARKER: &str = "...";

pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const RESET: &str = "\x1b[0m";

/// Wrap `text` in an SGR color sequence when `enabled`.
pub(crate) fn paint<'a>(text: &'a str, color: &str, enabled: bool) -> Cow<'a, str> {
    if enabled {
        Cow::Owned(format!("{color}{text}{RESET}"))
    } else {
        Cow::Borrowed(text)
    }
}

/// The role of a line in a block diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Present identically on both sides.
    Match,
    /// Present on the left side only.
    Delete,
    /// Present on the right side only.
    Insert,
}

impl From<ChangeTag> for EditOp {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => EditOp::Match,
            ChangeTag::Delete => EditOp::Delete,
            ChangeTag::Insert => EditOp::Insert,
        }
    }
}

/// A single line of a hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    /// Whether the line is shared, deleted or inserted.
    pub op: EditOp,
    /// The line content, without its newline.
    pub text: String,
}

impl Edit {
    /// Render the line with its role prefix and a trailing newline.
    pub fn render(&self, colors: bool) -> String {
        let line = match self.op {
            EditOp::Match => return format!(" {}\n", self.text),
            EditOp::Delete => paint(&format!("-{}", self.text), RED, colors).into_owned(),
            EditOp::Insert => paint(&format!("+{}", self.text), GREEN, colors).into_owned(),
        };
        line + "\n"
    }
}

/// A contiguous region of changes with surrounding context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hunk {
    /// The lines of this hunk, in display order.
    pub edits: Vec<Edit>,
}

impl Hunk {
    /// Returns `true` if the hunk contains at least one insert or delete.
    pub fn has_changes(&self) -> bool {
        self.edits.iter().any(|e| e.op != EditOp::Match)
    }
}

/// Compute the hunks between two line sequences, keeping `context` unchanged
/// lines around each change. Identical inputs produce no hunks.
pub fn hunks(x: &[&str], y: &[&str], context: usize) -> Vec<Hunk> {
    let diff = TextDiff::from_slices(x, y);
    diff.grouped_ops(context)
        .iter()
        .map(|group| Hunk {
            edits: group
                .iter()
                .flat_map(|op| diff.iter_changes(op))
                .map(|change| Edit {
                    op: change.tag().into(),
                    text: change.value().to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Render a line-by-line diff of two newline-terminated texts.
///
/// One trailing newline is stripped from each side before splitting.
/// Deleted lines are prefixed `-`, inserted lines `+`, context lines with a
/// space; with `colors` deletes are red and inserts green.
pub fn render_block_diff(x: &str, y: &str, colors: bool, context: usize) -> String {
    let xlines = split_lines(x);
    let ylines = split_lines(y);

    let mut out = String::new();
    for (i, hunk) in hunks(&xlines, &ylines, context).iter().enumerate() {
        if i > 0 {
            out.push_str(ELISION_MARKER);
            out.push('\n');
        }
        for edit in &hunk.edits {
            out.push_str(&edit.render(colors));
        }
    }
    out
}

fn split_lines(text: &str) -> Vec<&str> {
    text.strip_suffix('\n').unwrap_or(text).split('\n').collect()
}

#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    text.replace(RED, "").replace(GREEN, "").replace(RESET, "")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line{i}")).collect()
    }

    fn join(lines: &[String]) -> String {
        let mut s = lines.join("\n");
        s.push('\n');
        s
    }

    #[test]
    fn identical_texts_render_nothing() {
        assert_eq!(render_block_diff("a\nb\n", "a\nb\n", false, 3), "");
        assert!(hunks(&["a"], &["a"], 3).is_empty());
    }

    #[test]
    fn single_change_with_context() {
        let x = "{\n\t\"a\": 1,\n\t\"b\": 2\n}\n";
        let y = "{\n\t\"a\": 1,\n\t\"b\": 3\n}\n";
        assert_eq!(
            render_block_diff(x, y, false, 3),
            " {\n \t\"a\": 1,\n-\t\"b\": 2\n+\t\"b\": 3\n }\n"
        );
    }

    #[test]
    fn colored_lines() {
        let out = render_block_diff("a\nb\n", "a\nc\n", true, 3);
        assert_eq!(out, " a\n\x1b[31m-b\x1b[0m\n\x1b[32m+c\x1b[0m\n");
    }

    #[test]
    fn distant_changes_are_split_with_marker() {
        let x = numbered(20);
        let mut y = x.clone();
        y[0] = "first".into();
        y[19] = "last".into();

        let out = render_block_diff(&join(&x), &join(&y), false, 3);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.iter().filter(|l| **l == ELISION_MARKER).count(), 1);
        assert!(!out.contains(" line10\n"));
        assert!(out.contains(" line4\n"));
        assert!(out.contains(" line17\n"));
        assert!(!out.starts_with(ELISION_MARKER));
        assert!(!out.ends_with("...\n"));
    }

    #[test]
    fn close_changes_share_a_hunk() {
        let x = numbered(10);
        let mut y = x.clone();
        y[2] = "changed".into();
        y[5] = "changed".into();

        let out = render_block_diff(&join(&x), &join(&y), false, 3);
        assert!(!out.lines().any(|l| l == ELISION_MARKER));
        assert!(out.contains(" line4\n line5\n"));
    }

    #[test]
    fn gap_of_exactly_twice_the_context_is_kept() {
        let x = numbered(12);
        let mut y = x.clone();
        y[0] = "changed".into();
        y[7] = "changed".into();

        let out = render_block_diff(&join(&x), &join(&y), false, 3);
        assert!(!out.lines().any(|l| l == ELISION_MARKER));

        y[7] = x[7].clone();
        y[8] = "changed".into();
        let out = render_block_diff(&join(&x), &join(&y), false, 3);
        assert!(out.lines().any(|l| l == ELISION_MARKER));
    }

    #[test]
    fn only_one_trailing_newline_is_stripped() {
        let out = render_block_diff("a\n\n", "a\n", false, 3);
        assert_eq!(out, " a\n-\n");
    }

    #[test]
    fn hunk_edits_are_tagged() {
        let hunks = hunks(&["a", "b"], &["a", "c"], 3);
        assert_eq!(hunks.len(), 1);
        assert!(hunks[0].has_changes());
        let ops: Vec<EditOp> = hunks[0].edits.iter().map(|e| e.op).collect();
        assert_eq!(ops, vec![EditOp::Match, EditOp::Delete, EditOp::Insert]);
    }

    fn lcs_len(x: &[String], y: &[String]) -> usize {
        let mut table = vec![vec![0usize; y.len() + 1]; x.len() + 1];
        for i in (0..x.len()).rev() {
            for j in (0..y.len()).rev() {
                table[i][j] = if x[i] == y[j] {
                    table[i + 1][j + 1] + 1
                } else {
                    table[i + 1][j].max(table[i][j + 1])
                };
            }
        }
        table[0][0]
    }

    fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
        let mut it = haystack.iter();
        needle.iter().all(|n| it.any(|h| h == n))
    }

    proptest! {
        #[test]
        fn match_lines_form_a_common_subsequence(
            x in prop::collection::vec("[abc]", 1..12),
            y in prop::collection::vec("[abc]", 1..12),
        ) {
            let out = render_block_diff(&join(&x), &join(&y), false, 100);
            let matched: Vec<String> = out
                .lines()
                .filter_map(|l| l.strip_prefix(' '))
                .map(str::to_string)
                .collect();
            if x != y {
                prop_assert!(is_subsequence(&matched, &x));
                prop_assert!(is_subsequence(&matched, &y));
                prop_assert_eq!(matched.len(), lcs_len(&x, &y));
            }
        }

        #[test]
        fn color_only_adds_escape_codes(
            x in prop::collection::vec("[a-d]{0,3}", 1..15),
            y in prop::collection::vec("[a-d]{0,3}", 1..15),
        ) {
            let plain = render_block_diff(&join(&x), &join(&y), false, 3);
            let colored = render_block_diff(&join(&x), &join(&y), true, 3);
            prop_assert_eq!(strip_ansi(&colored), plain);
        }
    }
}
