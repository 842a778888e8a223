//! Reader and writer for NBT (Named Binary Tag) documents.
//!
//! NBT is the tree format Minecraft uses for its save data. A document is a
//! single named compound whose children are typed, named values: integers,
//! floats, strings, byte/int/long arrays, homogeneous lists and nested
//! compounds. Values are big-endian; files are usually gzip-compressed.
//!
//! # Examples
//!
//! ```
//! use mcmap_nbt::{Compound, NbtFile, Tag};
//!
//! let file = NbtFile::new(
//!     "",
//!     Compound::new().with("data", Tag::Compound(Compound::new().with("scale", Tag::Byte(3)))),
//! );
//! let bytes = mcmap_nbt::to_gzip_bytes(&file).unwrap();
//!
//! let parsed = mcmap_nbt::parse(&bytes).unwrap();
//! let data = parsed.root.get_compound("data").unwrap();
//! assert_eq!(data.get_byte("scale"), Some(3));
//! assert_eq!(data.get("missing"), None);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod compression;
pub mod error;
pub mod reader;
pub mod tag;
pub mod writer;

use std::path::Path;

pub use compression::Compression;
pub use error::{NbtError, Result};
pub use tag::{Compound, NbtFile, Tag, TagKind, TagList};
pub use writer::{to_bytes, to_gzip_bytes};

/// Parse a document from raw file bytes, compressed or not
pub fn parse(bytes: &[u8]) -> Result<NbtFile> {
    let plain = compression::decompress(bytes)?;
    reader::TagReader::new(&plain).read_document()
}

/// Read and parse a document from disk.
///
/// The file is read into memory and closed before parsing starts.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<NbtFile> {
    let bytes = std::fs::read(path.as_ref())?;
    log::debug!(
        "Read {} bytes from {}",
        bytes.len(),
        path.as_ref().display()
    );
    parse(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_file("/nonexistent/map_0.dat").unwrap_err();
        assert!(matches!(err, NbtError::Io(_)));
    }

    #[test]
    fn test_parse_plain_and_gzip_agree() {
        let file = NbtFile::new("root", Compound::new().with("v", Tag::Short(-2)));
        let plain = to_bytes(&file).unwrap();
        let gzip = to_gzip_bytes(&file).unwrap();
        assert_eq!(parse(&plain).unwrap(), parse(&gzip).unwrap());
    }
}
