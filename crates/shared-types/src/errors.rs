//! # Error Types
//!
//! Errors raised while building or decoding names.

use thiserror::Error;

/// Errors that can occur while constructing a `Name`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// A label between two dots (or at either end) is empty.
    #[error("empty label at position {position}")]
    EmptyLabel { position: usize },

    /// Label does not fit in a single DNS wire length octet.
    #[error("label at position {position} is {len} bytes, limit is 255")]
    LabelTooLong { position: usize, len: usize },

    /// Label contains a dot, which would not survive a text round trip.
    #[error("label at position {position} contains a dot")]
    DotInLabel { position: usize },

    /// Wire name ended inside a label or before the terminating zero octet.
    #[error("wire name truncated at offset {offset}")]
    Truncated { offset: usize },

    /// Bytes follow the terminating zero octet.
    #[error("{count} trailing bytes after wire name terminator")]
    TrailingBytes { count: usize },

    /// Wire label is not valid UTF-8.
    #[error("label at position {position} is not valid UTF-8")]
    InvalidUtf8 { position: usize },
}
