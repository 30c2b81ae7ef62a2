//! Colored, path-aware difference reports for deep value comparisons.
//!
//! A comparison engine walks two value trees in lock-step and drives an
//! [`Observer`] through `push_step` / `report` / `pop_step` callbacks. The
//! [`Reporter`] observer turns every leaf mismatch into a report entry:
//! single-line values are shown inline (`.Age: -30 +31`), multi-line values
//! (objects and arrays serialized as indented JSON) as a line-by-line block
//! diff with collapsed context.
//!
//! # Key Types
//!
//! - [`Reporter`] -- The path-tracking observer that accumulates the report
//! - [`Observer`] / [`Comparison`] -- The callback protocol used by drivers
//! - [`Path`] / [`PathStep`] -- Where in the tree a comparison happens
//! - [`LeafValue`] -- A resolved leaf handed over by the driver
//! - [`Hunk`] / [`Edit`] -- Line-level block diff structure
//! - [`Comparer`] -- A reference driver over `serde_json::Value` trees
//!
//! # Example
//!
//! ```
//! use colorcmp::{Comparer, Reporter};
//! use serde_json::json;
//!
//! let mut reporter = Reporter::default();
//! let equal = Comparer::default().compare(
//!     &json!({"Name": "Alice", "Age": 30}),
//!     &json!({"Name": "Alice", "Age": 31}),
//!     &mut reporter,
//! );
//! assert!(!equal);
//! assert_eq!(reporter.finish(), ".Age: -30 +31\n");
//! ```

pub mod compare;
pub mod config;
pub mod error;
mod finite;
pub mod format;
pub mod path;
pub mod render;
pub mod report;
pub mod reporter;
pub mod terminal;

pub use compare::{compare_serialized, Comparer};
pub use config::{ColorChoice, CompareOptions, ReporterConfig, DEFAULT_CONTEXT_LINES};
pub use error::{CompareError, CompareResult, FormatError};
pub use format::{format_value, LeafValue, INVALID_PLACEHOLDER};
pub use path::{Path, PathStep};
pub use render::{hunks, render_block_diff, Edit, EditOp, Hunk, ELISION_MARKER};
pub use report::{DiffEntry, Report};
pub use reporter::{Comparison, Observer, Reporter};
pub use terminal::{should_use_color, should_use_color_with, TerminalStream};
