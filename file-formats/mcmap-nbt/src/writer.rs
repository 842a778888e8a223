//! Serialization of NBT trees back to the wire format

use bytes::{BufMut, BytesMut};
use flate2::Compression as Level;
use flate2::write::GzEncoder;
use std::io::Write;

use crate::error::{NbtError, Result};
use crate::tag::{Compound, NbtFile, Tag, TagKind, TagList};

/// Encode a document as plain (uncompressed) NBT
pub fn to_bytes(file: &NbtFile) -> Result<Vec<u8>> {
    let mut buf = BytesMut::new();
    buf.put_u8(TagKind::Compound.id());
    put_string(&mut buf, &file.name)?;
    put_compound(&mut buf, &file.root)?;
    Ok(buf.to_vec())
}

/// Encode a document gzip-compressed, the way the game stores map files
pub fn to_gzip_bytes(file: &NbtFile) -> Result<Vec<u8>> {
    let plain = to_bytes(file)?;
    let mut encoder = GzEncoder::new(Vec::new(), Level::default());
    encoder.write_all(&plain)?;
    Ok(encoder.finish()?)
}

fn put_string(buf: &mut BytesMut, value: &str) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| NbtError::LengthOverflow(value.len()))?;
    buf.put_u16(len);
    buf.put_slice(value.as_bytes());
    Ok(())
}

fn put_len(buf: &mut BytesMut, len: usize) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| NbtError::LengthOverflow(len))?;
    buf.put_i32(len);
    Ok(())
}

fn put_compound(buf: &mut BytesMut, compound: &Compound) -> Result<()> {
    for (name, tag) in compound.iter() {
        buf.put_u8(tag.kind().id());
        put_string(buf, name)?;
        put_payload(buf, tag).map_err(|e| e.with_context(name))?;
    }
    buf.put_u8(TagKind::End.id());
    Ok(())
}

fn put_list(buf: &mut BytesMut, list: &TagList) -> Result<()> {
    buf.put_u8(list.element_kind().id());
    put_len(buf, list.len())?;
    for item in list {
        put_payload(buf, item)?;
    }
    Ok(())
}

fn put_payload(buf: &mut BytesMut, tag: &Tag) -> Result<()> {
    match tag {
        Tag::Byte(v) => buf.put_i8(*v),
        Tag::Short(v) => buf.put_i16(*v),
        Tag::Int(v) => buf.put_i32(*v),
        Tag::Long(v) => buf.put_i64(*v),
        Tag::Float(v) => buf.put_f32(*v),
        Tag::Double(v) => buf.put_f64(*v),
        Tag::ByteArray(v) => {
            put_len(buf, v.len())?;
            buf.put_slice(v);
        }
        Tag::String(v) => put_string(buf, v)?,
        Tag::List(v) => put_list(buf, v)?,
        Tag::Compound(v) => put_compound(buf, v)?,
        Tag::IntArray(v) => {
            put_len(buf, v.len())?;
            v.iter().for_each(|x| buf.put_i32(*x));
        }
        Tag::LongArray(v) => {
            put_len(buf, v.len())?;
            v.iter().for_each(|x| buf.put_i64(*x));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::TagReader;

    #[test]
    fn test_empty_document_layout() {
        let bytes = to_bytes(&NbtFile::default()).unwrap();
        assert_eq!(bytes, vec![0x0A, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_written_document_reads_back() {
        let frames = TagList::from_tags(
            TagKind::Compound,
            vec![Tag::Compound(Compound::new().with("Rotation", Tag::Int(90)))],
        )
        .unwrap();
        let file = NbtFile::new(
            "",
            Compound::new()
                .with("DataVersion", Tag::Int(3465))
                .with("name", Tag::String("Spawn".into()))
                .with("frames", Tag::List(frames))
                .with("heights", Tag::LongArray(vec![-1, 0, i64::MAX])),
        );

        let bytes = to_bytes(&file).unwrap();
        let parsed = TagReader::new(&bytes).read_document().unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_overlong_name() {
        let name = "x".repeat(usize::from(u16::MAX) + 1);
        let file = NbtFile::new(name, Compound::new());
        let err = to_bytes(&file).unwrap_err();
        assert!(matches!(err, NbtError::LengthOverflow(65536)));
    }
}
