//! Compression detection for NBT documents
//!
//! Minecraft writes `map_<n>.dat` gzip-compressed, region chunks use zlib,
//! and some tools write plain NBT. The format carries no flag, so the first
//! bytes decide.

use flate2::read::{MultiGzDecoder, ZlibDecoder};
use std::borrow::Cow;
use std::io::{self, Read};

use crate::error::{NbtError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const ZLIB_MAGIC: u8 = 0x78;

/// Largest inflated document accepted by [`decompress`].
///
/// A map file inflates to about 16 KiB; region chunks stay well under 1 MiB.
pub const MAX_INFLATED_SIZE: u64 = 64 * 1024 * 1024;

/// Container format wrapped around an NBT document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain NBT
    None,
    /// gzip (RFC 1952)
    Gzip,
    /// zlib (RFC 1950)
    Zlib,
}

impl Compression {
    /// Guess the container format from the first bytes of the input
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&GZIP_MAGIC) {
            Self::Gzip
        } else if data.first() == Some(&ZLIB_MAGIC) {
            Self::Zlib
        } else {
            Self::None
        }
    }

    /// Short lowercase name of the container
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "plain",
            Self::Gzip => "gzip",
            Self::Zlib => "zlib",
        }
    }
}

/// Strip any compression container, borrowing the input when there is none
pub fn decompress(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    decompress_with_limit(data, MAX_INFLATED_SIZE)
}

/// [`decompress`] with a custom cap on the inflated size
pub fn decompress_with_limit(data: &[u8], limit: u64) -> Result<Cow<'_, [u8]>> {
    let compression = Compression::detect(data);
    log::trace!(
        "Detected {} container ({} bytes)",
        compression.name(),
        data.len()
    );

    // One byte past the limit tells a full buffer from an oversized stream
    let cap = limit.saturating_add(1);
    let mut out = Vec::new();
    let inflated = match compression {
        Compression::None => return Ok(Cow::Borrowed(data)),
        Compression::Gzip => MultiGzDecoder::new(data).take(cap).read_to_end(&mut out),
        Compression::Zlib => ZlibDecoder::new(data).take(cap).read_to_end(&mut out),
    };

    let error = |source: io::Error| NbtError::Decompression {
        format: compression.name(),
        source,
    };
    inflated.map_err(error)?;
    if out.len() as u64 > limit {
        return Err(error(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("inflated size exceeds {limit} bytes"),
        )));
    }
    log::trace!("Inflated to {} bytes", out.len());
    Ok(Cow::Owned(out))
}
