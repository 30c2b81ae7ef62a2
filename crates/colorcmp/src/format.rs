//! Value serialization into a diff-friendly text form.
//!
//! Structured values are rendered as tab-indented JSON with sorted object
//! keys so that the same logical value always produces the same lines. Values
//! that have no JSON representation fall back to their `Debug` form, and a
//! side missing from the comparison renders as [`INVALID_PLACEHOLDER`].

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::debug;

use crate::error::FormatError;
use crate::finite::to_json;

/// Text rendered for a side that is absent from the comparison.
pub const INVALID_PLACEHOLDER: &str = "<invalid>";

/// One side of a leaf comparison, already resolved by the driving engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafValue {
    repr: Repr,
}

#[derive(Clone, Debug, PartialEq)]
enum Repr {
    Missing,
    Structured {
        type_name: Cow<'static, str>,
        value: Value,
    },
    Opaque {
        type_name: Cow<'static, str>,
        debug: String,
    },
}

impl LeafValue {
    /// A side that does not exist (e.g. a key present on one side only).
    pub fn missing() -> Self {
        Self {
            repr: Repr::Missing,
        }
    }

    /// Resolve a serializable value. If it cannot be represented as JSON
    /// (non-string map keys, NaN or infinite floats, a failing `Serialize`
    /// impl) its `Debug` form is kept instead.
    pub fn of<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Self {
        match to_json(value) {
            Ok(json) => Self::from_json(type_name::<T>(), json),
            Err(err) => {
                debug!(
                    type_name = type_name::<T>(),
                    %err,
                    "value has no structured form, using debug form"
                );
                Self::opaque(value)
            }
        }
    }

    /// Resolve a value that is only printable through `Debug`.
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self {
            repr: Repr::Opaque {
                type_name: Cow::Borrowed(type_name::<T>()),
                debug: format!("{value:?}"),
            },
        }
    }

    /// Wrap an already-built JSON value, labelled with `type_name`.
    pub fn from_json(type_name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        Self {
            repr: Repr::Structured {
                type_name: type_name.into(),
                value,
            },
        }
    }

    /// Returns `true` for the absent side of a comparison.
    pub fn is_missing(&self) -> bool {
        matches!(self.repr, Repr::Missing)
    }

    /// Name of the type this leaf was resolved from.
    pub fn type_name(&self) -> &str {
        match &self.repr {
            Repr::Missing => INVALID_PLACEHOLDER,
            Repr::Structured { type_name, .. } | Repr::Opaque { type_name, .. } => &**type_name,
        }
    }
}

/// Serialize a leaf into its diff text. The result always ends with `\n`.
pub fn format_value(leaf: &LeafValue) -> String {
    let mut text = match &leaf.repr {
        Repr::Missing => INVALID_PLACEHOLDER.to_string(),
        Repr::Structured { value, .. } => encode(value).unwrap_or_else(|err| {
            debug!(%err, "pretty encoding failed, using compact form");
            value.to_string()
        }),
        Repr::Opaque { debug, .. } => debug.clone(),
    };
    text.push('\n');
    text
}

/// Tab-indented JSON encoding.
fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
