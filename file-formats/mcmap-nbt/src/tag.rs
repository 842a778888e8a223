//! In-memory representation of an NBT tree

use std::fmt;

use crate::error::{NbtError, Result};

/// Type id of a tag as stored on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    /// Terminates a compound; also the element kind of an empty list
    End = 0,
    /// Signed 8-bit integer
    Byte = 1,
    /// Signed 16-bit integer
    Short = 2,
    /// Signed 32-bit integer
    Int = 3,
    /// Signed 64-bit integer
    Long = 4,
    /// 32-bit IEEE float
    Float = 5,
    /// 64-bit IEEE float
    Double = 6,
    /// Length-prefixed byte array
    ByteArray = 7,
    /// Length-prefixed string
    String = 8,
    /// Homogeneous list of unnamed tags
    List = 9,
    /// Named tags terminated by [`TagKind::End`]
    Compound = 10,
    /// Length-prefixed array of 32-bit integers
    IntArray = 11,
    /// Length-prefixed array of 64-bit integers
    LongArray = 12,
}

impl TagKind {
    /// Map a raw type id to a kind
    pub fn from_id(id: u8) -> Option<Self> {
        let kind = match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _ => return None,
        };
        Some(kind)
    }

    /// The raw type id
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Name used by the format documentation
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single NBT value
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Signed byte
    Byte(i8),
    /// Signed short
    Short(i16),
    /// Signed int
    Int(i32),
    /// Signed long
    Long(i64),
    /// Float
    Float(f32),
    /// Double
    Double(f64),
    /// Raw bytes
    ByteArray(Vec<u8>),
    /// Text
    String(String),
    /// Unnamed tags of one kind
    List(TagList),
    /// Named tags
    Compound(Compound),
    /// Ints
    IntArray(Vec<i32>),
    /// Longs
    LongArray(Vec<i64>),
}

impl Tag {
    /// The wire kind of this tag
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
            Self::LongArray(_) => TagKind::LongArray,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Self::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(v) => Some(v),
            _ => None,
        }
    }

    /// Short human-readable rendering of the value, without children
    pub fn summary(&self) -> String {
        match self {
            Self::Byte(v) => v.to_string(),
            Self::Short(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Long(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Double(v) => v.to_string(),
            Self::ByteArray(v) => format!("[{} bytes]", v.len()),
            Self::String(v) => format!("\"{v}\""),
            Self::List(v) => format!("[{} x {}]", v.len(), v.element_kind()),
            Self::Compound(v) => format!("{{{} entries}}", v.len()),
            Self::IntArray(v) => format!("[{} ints]", v.len()),
            Self::LongArray(v) => format!("[{} longs]", v.len()),
        }
    }
}

/// A list of unnamed tags sharing one element kind
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
    element_kind: TagKind,
    items: Vec<Tag>,
}

impl TagList {
    /// An empty list; the element kind of an empty list is `TAG_End`
    pub fn empty() -> Self {
        Self {
            element_kind: TagKind::End,
            items: Vec::new(),
        }
    }

    /// Build a list, checking that every item has the declared kind
    pub fn from_tags(element_kind: TagKind, items: Vec<Tag>) -> Result<Self> {
        if let Some(bad) = items.iter().find(|t| t.kind() != element_kind) {
            return Err(NbtError::MixedList {
                expected: element_kind,
                found: bad.kind(),
            });
        }
        Ok(Self {
            element_kind,
            items,
        })
    }

    pub fn element_kind(&self) -> TagKind {
        self.element_kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Named tags in file order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tag by name. Missing names are `None`, never an error.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tag)| tag)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace a tag, returning the previous value under that name
    pub fn insert(&mut self, name: impl Into<String>, tag: Tag) -> Option<Tag> {
        let name = name.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(slot, tag));
        }
        self.entries.push((name, tag));
        None
    }

    /// Builder-style [`Compound::insert`]
    pub fn with(mut self, name: impl Into<String>, tag: Tag) -> Self {
        self.insert(name, tag);
        self
    }

    /// Remove a tag by name
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn get_byte(&self, name: &str) -> Option<i8> {
        self.get(name).and_then(Tag::as_byte)
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(Tag::as_int)
    }

    pub fn get_byte_array(&self, name: &str) -> Option<&[u8]> {
        self.get(name).and_then(Tag::as_byte_array)
    }

    pub fn get_compound(&self, name: &str) -> Option<&Compound> {
        self.get(name).and_then(Tag::as_compound)
    }

    /// Append without the uniqueness check; the reader checks names itself
    pub(crate) fn push_unchecked(&mut self, name: String, tag: Tag) {
        self.entries.push((name, tag));
    }
}

/// A whole NBT document: a named root compound
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtFile {
    /// Name of the root tag, usually empty
    pub name: String,
    /// Root compound
    pub root: Compound,
}

impl NbtFile {
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_round_trip() {
        for id in 0..=12 {
            let kind = TagKind::from_id(id).expect("known id");
            assert_eq!(kind.id(), id);
        }
        assert_eq!(TagKind::from_id(13), None);
    }

    #[test]
    fn test_compound_lookup_missing_is_none() {
        let compound = Compound::new().with("scale", Tag::Byte(2));
        assert_eq!(compound.get_byte("scale"), Some(2));
        assert_eq!(compound.get("xCenter"), None);
        // Wrong type reads as absent through the typed accessors
        assert_eq!(compound.get_int("scale"), None);
    }

    #[test]
    fn test_compound_insert_replaces() {
        let mut compound = Compound::new();
        assert_eq!(compound.insert("a", Tag::Int(1)), None);
        assert_eq!(compound.insert("a", Tag::Int(2)), Some(Tag::Int(1)));
        assert_eq!(compound.len(), 1);
        assert_eq!(compound.get_int("a"), Some(2));
    }

    #[test]
    fn test_list_rejects_mixed_kinds() {
        let err = TagList::from_tags(TagKind::Int, vec![Tag::Int(1), Tag::Byte(2)]).unwrap_err();
        assert!(matches!(
            err,
            NbtError::MixedList {
                expected: TagKind::Int,
                found: TagKind::Byte
            }
        ));
    }

    #[test]
    fn test_summary() {
        assert_eq!(Tag::ByteArray(vec![0; 16]).summary(), "[16 bytes]");
        assert_eq!(Tag::String("x".into()).summary(), "\"x\"");
        assert_eq!(TagList::empty().element_kind(), TagKind::End);
    }
}
