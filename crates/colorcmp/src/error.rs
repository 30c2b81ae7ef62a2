//! Error types for the colorcmp crate.

use std::fmt;

/// Errors raised while encoding a leaf value into its structured text form.
///
/// These never reach users of [`Reporter`](crate::Reporter): the serializer
/// falls back to the debug representation instead.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The value could not be represented as JSON.
    #[error("structured encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The encoder produced bytes that are not valid UTF-8.
    #[error("encoded value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A NaN or infinite float, which JSON cannot represent.
    #[error("non-finite float {0} has no JSON representation")]
    NonFinite(f64),

    /// A `Serialize` implementation reported its own error.
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for FormatError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        FormatError::Custom(msg.to_string())
    }
}

/// Errors that can occur before a comparison starts walking.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// One of the compared values could not be converted into a JSON tree.
    #[error("cannot convert {side} value of type {type_name} into a comparable tree: {source}")]
    Unrepresentable {
        /// `"left"` or `"right"`.
        side: &'static str,
        /// The Rust type that failed to convert.
        type_name: &'static str,
        /// Why the conversion failed.
        #[source]
        source: FormatError,
    },
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
