//! Big-endian tag reader
//!
//! Reads an uncompressed NBT document from a byte slice. Every length read
//! from the input is checked against the remaining data before anything is
//! allocated, so a corrupt length field fails fast instead of reserving
//! gigabytes.

use crate::error::{NbtError, Result};
use crate::tag::{Compound, NbtFile, Tag, TagKind, TagList};

/// Maximum nesting of compounds and lists
pub const MAX_DEPTH: usize = 512;

/// A cursor for reading big-endian values from a byte slice
pub struct TagReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> TagReader<'a> {
    /// Create a reader at the beginning of the data
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset into the input
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(NbtError::UnexpectedEof {
                offset: self.position,
                needed: n,
            });
        }
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.take_array()?))
    }

    /// Read a tag type id
    pub fn read_kind(&mut self) -> Result<TagKind> {
        let offset = self.position;
        let id = self.read_u8()?;
        TagKind::from_id(id).ok_or(NbtError::UnknownTagType { id, offset })
    }

    /// Read a `u16`-prefixed string.
    ///
    /// The game writes Java's modified UTF-8; anything that is not valid
    /// UTF-8 is decoded lossily.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => {
                log::trace!(
                    "String at offset {} is not valid UTF-8, decoding lossily",
                    self.position - len
                );
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }

    /// Read an `i32` element count and check that `count * element_size`
    /// bytes are still available
    fn read_len(&mut self, element_size: usize) -> Result<usize> {
        let offset = self.position;
        let length = self.read_i32()?;
        let count = usize::try_from(length).map_err(|_| NbtError::NegativeLength { length, offset })?;
        let needed = count.saturating_mul(element_size);
        if needed > self.remaining() {
            return Err(NbtError::UnexpectedEof {
                offset: self.position,
                needed,
            });
        }
        Ok(count)
    }

    /// Read the payload of a tag whose kind is already known
    pub fn read_payload(&mut self, kind: TagKind, depth: usize) -> Result<Tag> {
        let tag = match kind {
            TagKind::End => {
                // TAG_End has no payload and cannot stand as a value
                return Err(NbtError::UnknownTagType {
                    id: 0,
                    offset: self.position,
                });
            }
            TagKind::Byte => Tag::Byte(self.read_i8()?),
            TagKind::Short => Tag::Short(self.read_i16()?),
            TagKind::Int => Tag::Int(self.read_i32()?),
            TagKind::Long => Tag::Long(self.read_i64()?),
            TagKind::Float => Tag::Float(self.read_f32()?),
            TagKind::Double => Tag::Double(self.read_f64()?),
            TagKind::ByteArray => {
                let count = self.read_len(1)?;
                Tag::ByteArray(self.take(count)?.to_vec())
            }
            TagKind::String => Tag::String(self.read_string()?),
            TagKind::List => Tag::List(self.read_list(depth + 1)?),
            TagKind::Compound => Tag::Compound(self.read_compound(depth + 1)?),
            TagKind::IntArray => {
                let count = self.read_len(4)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.read_i32()?);
                }
                Tag::IntArray(values)
            }
            TagKind::LongArray => {
                let count = self.read_len(8)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.read_i64()?);
                }
                Tag::LongArray(values)
            }
        };
        Ok(tag)
    }

    fn read_list(&mut self, depth: usize) -> Result<TagList> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthLimit(MAX_DEPTH));
        }
        let element_kind = self.read_kind()?;
        // Every element occupies at least one byte except TAG_End
        let min_size = usize::from(element_kind != TagKind::End);
        let count = self.read_len(min_size)?;

        if element_kind == TagKind::End {
            if count > 0 {
                log::debug!("List of TAG_End declares {count} elements, treating as empty");
            }
            return Ok(TagList::empty());
        }

        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let item = self
                .read_payload(element_kind, depth)
                .map_err(|e| e.with_context(&format!("[{index}]")))?;
            items.push(item);
        }
        TagList::from_tags(element_kind, items)
    }

    fn read_compound(&mut self, depth: usize) -> Result<Compound> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthLimit(MAX_DEPTH));
        }
        let mut compound = Compound::new();
        loop {
            let kind = self.read_kind()?;
            if kind == TagKind::End {
                return Ok(compound);
            }
            let name = self.read_string()?;
            if compound.contains_key(&name) {
                return Err(NbtError::DuplicateName(name));
            }
            let tag = self
                .read_payload(kind, depth)
                .map_err(|e| e.with_context(&name))?;
            compound.push_unchecked(name, tag);
        }
    }

    /// Read a complete document. The root must be a named compound.
    ///
    /// Bytes after the root compound are ignored.
    pub fn read_document(&mut self) -> Result<NbtFile> {
        let kind = self.read_kind()?;
        if kind != TagKind::Compound {
            return Err(NbtError::InvalidRoot(kind));
        }
        let name = self.read_string()?;
        let root = self.read_compound(1)?;
        if self.remaining() > 0 {
            log::debug!("Ignoring {} trailing bytes after root tag", self.remaining());
        }
        Ok(NbtFile { name, root })
    }
}
