//! Map item decoding
//!
//! A map file's root compound holds a `data` compound with the map's
//! metadata and its color buffer. Two decoders read it with different
//! tolerance for missing fields:
//!
//! - [`MapRecord::decode`] reads everything needed to render and fails on
//!   any missing field.
//! - [`MapSummary::decode`] reads only what a directory listing shows and
//!   reports missing scalars as [`UNKNOWN`], so one file from an older or
//!   newer game version does not break a listing.

use custom_debug::Debug;
use image::RgbaImage;
use mcmap_nbt::{Compound, NbtFile, Tag};
use mcmap_utils::debug;
use std::path::Path;

use crate::error::{DecodeError, Result};
use crate::geometry::{self, BorderSet};
use crate::palette;

/// Placeholder for a value that could not be read
pub const UNKNOWN: i32 = -1;

/// Name of the compound that holds the map
pub const DATA_SECTION: &str = "data";

/// A decoded map item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRecord {
    scale: u8,
    dimension: i8,
    width: i32,
    height: i32,
    x_center: i32,
    z_center: i32,
    #[debug(with = debug::trimmed_collection_fmt)]
    colors: Vec<u8>,
}

impl MapRecord {
    /// Create a record from already decoded values
    pub fn new(
        scale: u8,
        dimension: i8,
        width: i32,
        height: i32,
        x_center: i32,
        z_center: i32,
        colors: Vec<u8>,
    ) -> Self {
        Self {
            scale,
            dimension,
            width,
            height,
            x_center,
            z_center,
            colors,
        }
    }

    /// Decode the full record from a parsed map file
    pub fn decode(file: &NbtFile) -> Result<Self> {
        let data = data_section(file)?;

        let scale = required(data, "scale", scale_value)?;
        let x_center = required(data, "xCenter", int_value)?;
        let z_center = required(data, "zCenter", int_value)?;
        let height = required(data, "height", int_value)?;
        let width = required(data, "width", int_value)?;
        let dimension = required(data, "dimension", dimension_value)?;
        let colors = required(data, "colors", |tag| tag.as_byte_array().map(<[u8]>::to_vec))?;

        let record = Self {
            scale,
            dimension,
            width,
            height,
            x_center,
            z_center,
            colors,
        };
        log::debug!(
            "Decoded {}x{} map, scale {}, center {},{}",
            record.width,
            record.height,
            record.scale,
            record.x_center,
            record.z_center
        );
        Ok(record)
    }

    /// Write the record back in the layout the game uses
    pub fn to_nbt(&self) -> NbtFile {
        let data = Compound::new()
            .with("scale", Tag::Byte(self.scale as i8))
            .with("dimension", Tag::Byte(self.dimension))
            .with("height", Tag::Int(self.height))
            .with("width", Tag::Int(self.width))
            .with("xCenter", Tag::Int(self.x_center))
            .with("zCenter", Tag::Int(self.z_center))
            .with("colors", Tag::ByteArray(self.colors.clone()));
        NbtFile::new("", Compound::new().with(DATA_SECTION, Tag::Compound(data)))
    }

    /// Zoom level; one pixel spans `2^scale` blocks in game
    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// World the map was made in: 0 overworld, -1 nether, 1 end
    pub fn dimension(&self) -> i8 {
        self.dimension
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn x_center(&self) -> i32 {
        self.x_center
    }

    pub fn z_center(&self) -> i32 {
        self.z_center
    }

    /// Palette indices, row-major
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Render the color buffer through the palette
    pub fn render(&self) -> Result<RgbaImage> {
        palette::render(&self.colors, self.width, self.height)
    }

    /// World coordinates of the map's corners
    pub fn borders(&self) -> BorderSet {
        geometry::borders(self)
    }
}

/// The fields a directory listing needs, tolerant of missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSummary {
    /// Scale, or [`UNKNOWN`]
    pub scale: i32,
    /// X center, or [`UNKNOWN`]
    pub x_center: i32,
    /// Z center, or [`UNKNOWN`]
    pub z_center: i32,
}

impl MapSummary {
    /// Read scale and center without touching the color buffer.
    ///
    /// A missing `data` compound is still an error; only individual fields
    /// fall back to [`UNKNOWN`].
    pub fn decode(file: &NbtFile) -> Result<Self> {
        let data = data_section(file)?;
        Ok(Self {
            scale: optional(data, "scale", scale_value)?
                .map_or(UNKNOWN, i32::from),
            x_center: optional(data, "xCenter", int_value)?.unwrap_or(UNKNOWN),
            z_center: optional(data, "zCenter", int_value)?.unwrap_or(UNKNOWN),
        })
    }
}

/// Read, parse and fully decode one map file
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<MapRecord> {
    let file = mcmap_nbt::read_file(path.as_ref())?;
    MapRecord::decode(&file)
}

/// Read, parse and decode the summary of one map file
pub fn load_summary<P: AsRef<Path>>(path: P) -> Result<MapSummary> {
    let file = mcmap_nbt::read_file(path.as_ref())?;
    MapSummary::decode(&file)
}

fn data_section(file: &NbtFile) -> Result<&Compound> {
    match file.root.get(DATA_SECTION) {
        None => Err(DecodeError::MissingSection(DATA_SECTION)),
        Some(Tag::Compound(data)) => Ok(data),
        Some(other) => Err(DecodeError::Malformed(format!(
            "'{DATA_SECTION}' is a {}, expected a compound",
            other.kind()
        ))),
    }
}

fn optional<T>(
    data: &Compound,
    name: &'static str,
    convert: impl Fn(&Tag) -> Option<T>,
) -> Result<Option<T>> {
    match data.get(name) {
        None => Ok(None),
        Some(tag) => convert(tag).map(Some).ok_or_else(|| {
            DecodeError::Malformed(format!(
                "field '{name}' has unexpected type {}",
                tag.kind()
            ))
        }),
    }
}

fn required<T>(
    data: &Compound,
    name: &'static str,
    convert: impl Fn(&Tag) -> Option<T>,
) -> Result<T> {
    optional(data, name, convert)?.ok_or(DecodeError::MissingField(name))
}

/// Integer fields were shorts in older saves and ints in newer ones
fn int_value(tag: &Tag) -> Option<i32> {
    match tag {
        Tag::Byte(v) => Some(i32::from(*v)),
        Tag::Short(v) => Some(i32::from(*v)),
        Tag::Int(v) => Some(*v),
        _ => None,
    }
}

/// Scale is an unsigned byte stored in a signed tag; wider tags must fit
fn scale_value(tag: &Tag) -> Option<u8> {
    match tag {
        Tag::Byte(v) => Some(*v as u8),
        Tag::Short(v) => u8::try_from(*v).ok(),
        Tag::Int(v) => u8::try_from(*v).ok(),
        _ => None,
    }
}

/// `dimension` was a byte, then an int, then a namespaced string
fn dimension_value(tag: &Tag) -> Option<i8> {
    match tag {
        Tag::Byte(v) => Some(*v),
        Tag::Int(v) => i8::try_from(*v).ok(),
        Tag::String(name) => match name.as_str() {
            "minecraft:overworld" => Some(0),
            "minecraft:the_nether" => Some(-1),
            "minecraft:the_end" => Some(1),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(fields: Compound) -> NbtFile {
        NbtFile::new("", Compound::new().with(DATA_SECTION, Tag::Compound(fields)))
    }

    fn full_fields() -> Compound {
        Compound::new()
            .with("scale", Tag::Byte(2))
            .with("dimension", Tag::Byte(0))
            .with("height", Tag::Int(2))
            .with("width", Tag::Int(2))
            .with("xCenter", Tag::Int(-100))
            .with("zCenter", Tag::Int(300))
            .with("colors", Tag::ByteArray(vec![4, 5, 6, 7]))
    }

    #[test]
    fn test_decode_full() {
        let record = MapRecord::decode(&data(full_fields())).unwrap();
        assert_eq!(record.scale(), 2);
        assert_eq!(record.dimension(), 0);
        assert_eq!((record.width(), record.height()), (2, 2));
        assert_eq!((record.x_center(), record.z_center()), (-100, 300));
        assert_eq!(record.colors(), &[4, 5, 6, 7]);
    }

    #[test]
    fn test_decode_missing_data_section() {
        let file = NbtFile::new("", Compound::new().with("DataVersion", Tag::Int(1)));
        assert!(matches!(
            MapRecord::decode(&file),
            Err(DecodeError::MissingSection("data"))
        ));
        assert!(matches!(
            MapSummary::decode(&file),
            Err(DecodeError::MissingSection("data"))
        ));
    }

    #[test]
    fn test_decode_missing_colors() {
        let mut fields = full_fields();
        fields.remove("colors");
        assert!(matches!(
            MapRecord::decode(&data(fields)),
            Err(DecodeError::MissingField("colors"))
        ));
    }

    #[test]
    fn test_decode_wrong_type_is_malformed() {
        let fields = full_fields().with("colors", Tag::String("nope".into()));
        assert!(matches!(
            MapRecord::decode(&data(fields)),
            Err(DecodeError::Malformed(_))
        ));

        let file = NbtFile::new("", Compound::new().with(DATA_SECTION, Tag::Int(3)));
        assert!(matches!(
            MapRecord::decode(&file),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_short_dimensions_are_widened() {
        let fields = full_fields()
            .with("height", Tag::Short(128))
            .with("width", Tag::Short(128));
        let record = MapRecord::decode(&data(fields)).unwrap();
        assert_eq!((record.width(), record.height()), (128, 128));
    }

    #[test]
    fn test_dimension_variants() {
        for (tag, expected) in [
            (Tag::Byte(-1), -1),
            (Tag::Int(1), 1),
            (Tag::String("minecraft:the_nether".into()), -1),
            (Tag::String("minecraft:overworld".into()), 0),
        ] {
            let record = MapRecord::decode(&data(full_fields().with("dimension", tag))).unwrap();
            assert_eq!(record.dimension(), expected);
        }

        let fields = full_fields().with("dimension", Tag::String("mymod:moon".into()));
        assert!(matches!(
            MapRecord::decode(&data(fields)),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_summary_missing_fields_are_unknown() {
        let mut fields = full_fields();
        fields.remove("xCenter");
        fields.remove("scale");

        let summary = MapSummary::decode(&data(fields)).unwrap();
        assert_eq!(summary.scale, UNKNOWN);
        assert_eq!(summary.x_center, UNKNOWN);
        assert_eq!(summary.z_center, 300);
    }

    #[test]
    fn test_scale_byte_is_unsigned_in_both_decoders() {
        let fields = full_fields().with("scale", Tag::Byte(-1));
        let record = MapRecord::decode(&data(fields.clone())).unwrap();
        let summary = MapSummary::decode(&data(fields)).unwrap();
        assert_eq!(record.scale(), 255);
        assert_eq!(summary.scale, 255);
        assert_ne!(summary.scale, UNKNOWN);

        let fields = full_fields().with("scale", Tag::Byte(-56));
        assert_eq!(MapRecord::decode(&data(fields.clone())).unwrap().scale(), 200);
        assert_eq!(MapSummary::decode(&data(fields)).unwrap().scale, 200);
    }

    #[test]
    fn test_scale_out_of_range_is_malformed() {
        for tag in [Tag::Int(256), Tag::Int(-1), Tag::Short(300)] {
            let fields = full_fields().with("scale", tag);
            assert!(matches!(
                MapRecord::decode(&data(fields.clone())),
                Err(DecodeError::Malformed(_))
            ));
            assert!(matches!(
                MapSummary::decode(&data(fields)),
                Err(DecodeError::Malformed(_))
            ));
        }

        let fields = full_fields().with("scale", Tag::Int(4));
        assert_eq!(MapRecord::decode(&data(fields.clone())).unwrap().scale(), 4);
        assert_eq!(MapSummary::decode(&data(fields)).unwrap().scale, 4);
    }

    #[test]
    fn test_summary_ignores_colors() {
        let mut fields = full_fields();
        fields.remove("colors");
        let summary = MapSummary::decode(&data(fields)).unwrap();
        assert_eq!(summary.scale, 2);
    }

    #[test]
    fn test_to_nbt_round_trip() {
        let record = MapRecord::new(3, -1, 2, 1, 5, -5, vec![10, 20]);
        assert_eq!(MapRecord::decode(&record.to_nbt()).unwrap(), record);
    }

    #[test]
    fn test_debug_trims_colors() {
        let record = MapRecord::new(0, 0, 128, 128, 0, 0, vec![0; 16384]);
        let out = format!("{:?}", record);
        assert!(out.contains("+ 16376 elements"));
    }
}
