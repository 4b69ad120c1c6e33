//! Errors produced while parsing or evaluating a dot path.
use thiserror::Error;

use crate::value::Shape;

/// Represents the ways a dot path evaluation can fail.
///
/// Navigation failures are distinct variants so callers can tell "not
/// found" from "wrong shape" from "out of bounds".
#[derive(Error, Debug)]
pub enum DotPathError {
    /// The path text is empty or malformed.
    #[error("{path:?} is an invalid dot path: {reason}")]
    InvalidPath {
        /// The offending path text
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Bracket content that should be an integer is not one.
    #[error("can't parse array index {text:?}")]
    InvalidIndex {
        /// The bracket content as written
        text: String,
    },

    /// An object lookup failed.
    #[error("key {key:?} not found")]
    KeyNotFound {
        /// The missing key
        key: String,
    },

    /// An array lookup exceeded the array bounds.
    #[error("index {index} is out of bounds for array of length {length}")]
    IndexOutOfBounds {
        /// The requested index
        index: i64,
        /// The length of the array
        length: usize,
    },

    /// The segment kind does not fit the shape of the value.
    #[error("expected {expected}, found {actual}")]
    TypeMismatch {
        /// The shape the segment requires
        expected: Shape,
        /// The shape of the value actually found
        actual: Shape,
    },

    /// Navigation ran out of segments before reaching a value.
    #[error("dot path exhausted")]
    PathExhausted,

    /// The raw input was not valid JSON.
    #[error("failed to decode JSON: {cause}")]
    DecodeError {
        /// The decoder diagnostic
        #[source]
        cause: serde_json::Error,
    },
}
