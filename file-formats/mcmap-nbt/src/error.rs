//! Error handling for NBT parsing

use std::io;
use thiserror::Error;

use crate::tag::TagKind;

/// Errors that can occur when reading or writing NBT data
#[derive(Debug, Error)]
pub enum NbtError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The compressed stream could not be inflated
    #[error("Failed to decompress {format} stream: {source}")]
    Decompression {
        /// Name of the compression format that was detected
        format: &'static str,
        /// Underlying inflate error
        source: io::Error,
    },

    /// Input ended in the middle of a value
    #[error("Unexpected end of data at offset {offset} ({needed} more bytes needed)")]
    UnexpectedEof {
        /// Offset at which the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
    },

    /// A tag type id outside of the known range
    #[error("Unknown tag type {id} at offset {offset}")]
    UnknownTagType {
        /// The raw type id
        id: u8,
        /// Offset of the type id
        offset: usize,
    },

    /// An array or list declared a negative length
    #[error("Negative length {length} at offset {offset}")]
    NegativeLength {
        /// The declared length
        length: i32,
        /// Offset of the length field
        offset: usize,
    },

    /// The root tag is not a compound
    #[error("Root tag must be a compound, found {0}")]
    InvalidRoot(TagKind),

    /// A compound contains the same name twice
    #[error("Duplicate tag name '{0}' in compound")]
    DuplicateName(String),

    /// Compounds and lists nest deeper than the reader allows
    #[error("Nesting depth exceeds {0} levels")]
    DepthLimit(usize),

    /// A list was built from tags of different kinds
    #[error("List of {expected} cannot hold a {found} tag")]
    MixedList {
        /// Element kind of the list
        expected: TagKind,
        /// Kind of the offending element
        found: TagKind,
    },

    /// A value is too long to be represented on the wire
    #[error("Length {0} does not fit the NBT length field")]
    LengthOverflow(usize),

    /// Error with the path of the tag being read
    #[error("In '{0}': {1}")]
    Context(String, Box<Self>),
}

impl NbtError {
    /// Add the name of the enclosing tag to an error
    pub fn with_context(self, context: &str) -> Self {
        match self {
            // Build a dotted path instead of nesting one level per compound
            Self::Context(inner, source) => Self::Context(format!("{context}.{inner}"), source),
            other => Self::Context(context.to_owned(), Box::new(other)),
        }
    }

    /// The error without any path context attached
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Context(_, source) => source.root_cause(),
            other => other,
        }
    }

    /// The dotted tag path the error occurred in, if known
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Context(path, _) => Some(path),
            _ => None,
        }
    }
}

/// Type alias for Results from NBT operations
pub type Result<T> = std::result::Result<T, NbtError>;
