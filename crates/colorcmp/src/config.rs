use serde::{Deserialize, Serialize};

/// Number of unchanged lines shown around each change in a block diff.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// When a [`Reporter`](crate::Reporter) emits ANSI color sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Detect from the environment and the output stream.
    Auto,
    /// Always emit color.
    Always,
    /// Never emit color.
    #[default]
    Never,
}

/// Configuration for a [`Reporter`](crate::Reporter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Color policy for rendered entries.
    pub color: ColorChoice,
    /// Unchanged lines kept around each change in block diffs. Runs of
    /// unchanged lines longer than twice this budget are elided with `...`.
    pub context_lines: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Never,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl ReporterConfig {
    /// A configuration that auto-detects color support.
    pub fn auto() -> Self {
        Self {
            color: ColorChoice::Auto,
            ..Default::default()
        }
    }
}

/// Options for the reference [`Comparer`](crate::Comparer).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Depth at which subtrees stop being walked and are compared as a
    /// whole. `Some(0)` compares the two roots as single leaves.
    pub max_depth: Option<usize>,
}
