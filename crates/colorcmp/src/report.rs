//! Diff entries and the append-only report that collects them.

use std::fmt;

use crate::render::{paint, render_block_diff, GREEN, RED};

/// One mismatch, before rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffEntry {
    /// Both sides fit on one line: `label: -left +right`.
    Inline {
        /// Rendered path of the mismatch.
        label: String,
        /// Left value, without trailing newline.
        left: String,
        /// Right value, without trailing newline.
        right: String,
    },
    /// At least one side spans several lines. `left` and `right` are the
    /// newline-terminated serializations.
    Block {
        /// Rendered path of the mismatch.
        label: String,
        /// Left value text.
        left: String,
        /// Right value text.
        right: String,
    },
}

impl DiffEntry {
    /// Pick the inline form when neither side contains a newline once the
    /// trailing one is removed, the block form otherwise.
    pub fn new(label: String, left: String, right: String) -> Self {
        let single_line = |s: &str| !s.strip_suffix('\n').unwrap_or(s).contains('\n');
        if single_line(&left) && single_line(&right) {
            DiffEntry::Inline {
                label,
                left: trim_newline(left),
                right: trim_newline(right),
            }
        } else {
            DiffEntry::Block { label, left, right }
        }
    }

    /// The path label this entry is reported under.
    pub fn label(&self) -> &str {
        match self {
            DiffEntry::Inline { label, .. } | DiffEntry::Block { label, .. } => label,
        }
    }

    /// Returns `true` for the single-line form.
    pub fn is_inline(&self) -> bool {
        matches!(self, DiffEntry::Inline { .. })
    }

    /// Render to newline-terminated text.
    pub fn render(&self, colors: bool, context: usize) -> String {
        match self {
            DiffEntry::Inline { label, left, right } => format!(
                "{label}: {} {}\n",
                paint(&format!("-{left}"), RED, colors),
                paint(&format!("+{right}"), GREEN, colors),
            ),
            DiffEntry::Block { label, left, right } => {
                format!("{label}:\n{}", render_block_diff(left, right, colors, context))
            }
        }
    }
}

fn trim_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
    }
    s
}

/// Rendered entries in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-rendered entry.
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    /// Number of entries recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no mismatch was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries joined in order. Each entry carries its own newline.
    pub fn join(&self) -> String {
        self.entries.concat()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entries.iter().try_for_each(|e| f.write_str(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_values_render_inline() {
        let entry = DiffEntry::new(".Age".into(), "30\n".into(), "31\n".into());
        assert!(entry.is_inline());
        assert_eq!(entry.render(false, 3), ".Age: -30 +31\n");
        assert_eq!(
            entry.render(true, 3),
            ".Age: \x1b[31m-30\x1b[0m \x1b[32m+31\x1b[0m\n"
        );
    }

    #[test]
    fn multi_line_side_renders_block() {
        let entry = DiffEntry::new(
            ".Server".into(),
            "{\n\t\"port\": 1\n}\n".into(),
            "<invalid>\n".into(),
        );
        assert!(!entry.is_inline());
        assert_eq!(entry.label(), ".Server");
        assert_eq!(
            entry.render(false, 3),
            ".Server:\n-{\n-\t\"port\": 1\n-}\n+<invalid>\n"
        );
    }

    #[test]
    fn report_joins_without_separator() {
        let mut report = Report::new();
        assert!(report.is_empty());
        assert_eq!(report.join(), "");
        report.push(".a: -1 +2\n".into());
        report.push(".b: -3 +4\n".into());
        assert_eq!(report.len(), 2);
        assert_eq!(report.join(), ".a: -1 +2\n.b: -3 +4\n");
        assert_eq!(report.to_string(), report.join());
    }
}
