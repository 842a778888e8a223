//! Error types for map decoding and cataloguing

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use mcmap_nbt::NbtError;

/// Errors produced while decoding or rendering a single map file
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The tag tree is truncated, corrupt, or a field has the wrong type
    #[error("Malformed map data: {0}")]
    Malformed(String),

    /// A required compound is absent
    #[error("Missing section '{0}'")]
    MissingSection(&'static str),

    /// A required field is absent
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    /// A color byte outside of the palette
    #[error("Color index {0} is outside the 144-entry palette")]
    PaletteIndexOutOfRange(u8),

    /// The color buffer does not cover width x height pixels
    #[error("Map is {width}x{height} but holds {actual} color bytes")]
    DimensionMismatch {
        /// Declared width
        width: i32,
        /// Declared height
        height: i32,
        /// Length of the color buffer
        actual: usize,
    },

    /// The PNG encoder failed
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl From<NbtError> for DecodeError {
    fn from(error: NbtError) -> Self {
        match error {
            NbtError::Io(e) => Self::Io(e),
            other => Self::Malformed(other.to_string()),
        }
    }
}

/// Errors produced while listing save or map directories
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A directory could not be listed
    #[error("Failed to list directory {}: {source}", path.display())]
    Listing {
        /// The directory that was listed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// No home directory to derive the default saves location from
    #[error("Could not determine the Minecraft saves directory")]
    NoSavesDirectory,
}

/// Type alias for Results from decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;
