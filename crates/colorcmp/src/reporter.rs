//! The path-tracking reporter and the callback protocol that drives it.
//!
//! A driving engine walks two value trees in lock-step and calls, in
//! well-nested order, [`Observer::push_step`] when entering a child,
//! [`Observer::report`] once per compared leaf, and [`Observer::pop_step`]
//! when leaving the child again.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{ColorChoice, ReporterConfig, DEFAULT_CONTEXT_LINES};
use crate::format::{format_value, LeafValue};
use crate::path::{Path, PathStep};
use crate::report::{DiffEntry, Report};
use crate::terminal::{should_use_color, TerminalStream};

/// Outcome of comparing one pair of leaves.
#[derive(Clone, Debug, PartialEq)]
pub enum Comparison {
    /// The leaves are equal.
    Equal,
    /// The leaves differ. Either side may be [`LeafValue::missing`].
    Unequal {
        /// The left-hand leaf.
        left: LeafValue,
        /// The right-hand leaf.
        right: LeafValue,
    },
}

impl Comparison {
    /// A mismatch between `left` and `right`.
    pub fn unequal(left: LeafValue, right: LeafValue) -> Self {
        Comparison::Unequal { left, right }
    }

    /// Returns `true` if the leaves matched.
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }
}

/// Receiver of traversal callbacks from a comparison engine.
///
/// Calls are not reentrant: an observer is driven from a single call stack.
pub trait Observer {
    /// Enter a child node.
    fn push_step(&mut self, step: PathStep);

    /// Record the outcome of comparing the leaves at the current path.
    fn report(&mut self, result: Comparison);

    /// Leave the child entered by the matching `push_step`.
    fn pop_step(&mut self);
}

/// Accumulates a colored, human-readable report of leaf mismatches.
///
/// `Reporter::default()` never emits color, which keeps output safe for
/// non-terminal sinks. Use [`Reporter::new`] to detect color support for a
/// given output stream.
///
/// ```
/// use colorcmp::{Comparison, LeafValue, Observer, PathStep, Reporter};
///
/// let mut reporter = Reporter::default();
/// reporter.push_step(PathStep::field("Age"));
/// reporter.report(Comparison::unequal(LeafValue::of(&30), LeafValue::of(&31)));
/// reporter.pop_step();
/// assert_eq!(reporter.finish(), ".Age: -30 +31\n");
/// ```
#[derive(Clone, Debug)]
pub struct Reporter {
    path: Path,
    report: Report,
    colors: bool,
    context_lines: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self {
            path: Path::new(),
            report: Report::new(),
            colors: false,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl Reporter {
    /// A reporter that uses colors if `stream` supports them. `NO_COLOR` and
    /// `FORCE_COLOR` are honored.
    pub fn new<S: TerminalStream + ?Sized>(stream: &S) -> Self {
        Self::with_config(&ReporterConfig::auto(), stream)
    }

    /// A reporter configured explicitly. `stream` is only consulted when
    /// the color choice is [`ColorChoice::Auto`].
    pub fn with_config<S: TerminalStream + ?Sized>(config: &ReporterConfig, stream: &S) -> Self {
        let colors = match config.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => should_use_color(stream),
        };
        debug!(color = ?config.color, colors, "reporter created");
        Self {
            colors,
            context_lines: config.context_lines,
            ..Default::default()
        }
    }

    /// Whether rendered entries carry ANSI color sequences.
    pub fn colors(&self) -> bool {
        self.colors
    }

    /// The current traversal path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of mismatches recorded so far.
    pub fn len(&self) -> usize {
        self.report.len()
    }

    /// Returns `true` if no mismatch was recorded.
    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }

    /// The accumulated report. May be called at any time; mid-traversal it
    /// returns the entries recorded so far.
    pub fn finish(&self) -> String {
        self.report.join()
    }

    fn label(&self, left: &LeafValue) -> String {
        if self.path.is_empty() {
            format!("{{{}}}", left.type_name())
        } else {
            self.path.to_string()
        }
    }
}

impl Observer for Reporter {
    fn push_step(&mut self, step: PathStep) {
        self.path.push(step);
    }

    fn report(&mut self, result: Comparison) {
        let Comparison::Unequal { left, right } = result else {
            return;
        };

        let label = self.label(&left);
        let entry = DiffEntry::new(label, format_value(&left), format_value(&right));
        trace!(label = entry.label(), inline = entry.is_inline(), "recording mismatch");
        self.report.push(entry.render(self.colors, self.context_lines));
    }

    /// # Panics
    ///
    /// Panics when no step is left to pop.
    fn pop_step(&mut self) {
        self.path.pop();
    }
}

impl fmt::Display for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.report, f)
    }
}
