//! Palette rendering
//!
//! Map items store one byte per pixel. The byte is an index into a fixed
//! table: `index / 4` selects one of 36 base colors and `index % 4` one of
//! four shades of it. The first group is fully transparent (unexplored).

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::{DecodeError, Result};

/// Number of entries in [`PALETTE`]
pub const PALETTE_SIZE: usize = 144;

/// Shades per base color
pub const SHADES: usize = 4;

/// One palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PaletteEntry {
    /// The color as an `image` pixel
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

const TRANSPARENT: PaletteEntry = PaletteEntry {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

const fn rgb(r: u8, g: u8, b: u8) -> PaletteEntry {
    PaletteEntry { r, g, b, a: 255 }
}

/// Map colors as of Minecraft 1.8, four shades per base color
#[rustfmt::skip]
pub const PALETTE: [PaletteEntry; PALETTE_SIZE] = [
    TRANSPARENT, TRANSPARENT, TRANSPARENT, TRANSPARENT,
    rgb(88, 124, 39), rgb(108, 151, 47), rgb(125, 176, 55), rgb(66, 93, 29),
    rgb(172, 162, 114), rgb(210, 199, 138), rgb(244, 230, 161), rgb(128, 122, 85),
    rgb(138, 138, 138), rgb(169, 169, 169), rgb(197, 197, 197), rgb(104, 104, 104),
    rgb(178, 0, 0), rgb(217, 0, 0), rgb(252, 0, 0), rgb(133, 0, 0),
    rgb(111, 111, 178), rgb(136, 136, 217), rgb(158, 158, 252), rgb(83, 83, 133),
    rgb(116, 116, 116), rgb(142, 142, 142), rgb(165, 165, 165), rgb(87, 87, 87),
    rgb(0, 86, 0), rgb(0, 105, 0), rgb(0, 123, 0), rgb(0, 64, 0),
    rgb(178, 178, 178), rgb(217, 217, 217), rgb(252, 252, 252), rgb(133, 133, 133),
    rgb(114, 117, 127), rgb(139, 142, 156), rgb(162, 166, 182), rgb(85, 87, 96),
    rgb(105, 75, 53), rgb(128, 93, 65), rgb(149, 108, 76), rgb(78, 56, 39),
    rgb(78, 78, 78), rgb(95, 95, 95), rgb(111, 111, 111), rgb(58, 58, 58),
    rgb(44, 44, 178), rgb(54, 54, 217), rgb(63, 63, 252), rgb(33, 33, 133),
    rgb(99, 83, 49), rgb(122, 101, 61), rgb(141, 118, 71), rgb(74, 62, 38),
    rgb(178, 175, 170), rgb(217, 214, 208), rgb(252, 249, 242), rgb(133, 131, 127),
    rgb(150, 88, 36), rgb(184, 108, 43), rgb(213, 125, 50), rgb(113, 66, 27),
    rgb(124, 52, 150), rgb(151, 64, 184), rgb(176, 75, 213), rgb(93, 39, 113),
    rgb(71, 107, 150), rgb(87, 130, 184), rgb(101, 151, 213), rgb(53, 80, 113),
    rgb(159, 159, 36), rgb(195, 195, 43), rgb(226, 226, 50), rgb(120, 120, 27),
    rgb(88, 142, 17), rgb(108, 174, 21), rgb(125, 202, 25), rgb(66, 107, 13),
    rgb(168, 88, 115), rgb(206, 108, 140), rgb(239, 125, 163), rgb(126, 66, 86),
    rgb(52, 52, 52), rgb(64, 64, 64), rgb(75, 75, 75), rgb(39, 39, 39),
    rgb(107, 107, 107), rgb(130, 130, 130), rgb(151, 151, 151), rgb(80, 80, 80),
    rgb(52, 88, 107), rgb(64, 108, 130), rgb(75, 125, 151), rgb(39, 66, 80),
    rgb(88, 43, 124), rgb(108, 53, 151), rgb(125, 62, 176), rgb(66, 33, 93),
    rgb(36, 52, 124), rgb(43, 64, 151), rgb(50, 75, 176), rgb(27, 39, 93),
    rgb(71, 52, 36), rgb(87, 64, 43), rgb(101, 75, 50), rgb(53, 39, 27),
    rgb(71, 88, 36), rgb(87, 108, 43), rgb(101, 125, 50), rgb(53, 66, 27),
    rgb(107, 36, 36), rgb(130, 43, 43), rgb(151, 50, 50), rgb(80, 27, 27),
    rgb(17, 17, 17), rgb(21, 21, 21), rgb(25, 25, 25), rgb(13, 13, 13),
    rgb(174, 166, 53), rgb(212, 203, 65), rgb(247, 235, 76), rgb(130, 125, 39),
    rgb(63, 152, 148), rgb(78, 186, 181), rgb(91, 216, 210), rgb(47, 114, 111),
    rgb(51, 89, 178), rgb(62, 109, 217), rgb(73, 129, 252), rgb(39, 66, 133),
    rgb(0, 151, 39), rgb(0, 185, 49), rgb(0, 214, 57), rgb(0, 113, 30),
    rgb(90, 59, 34), rgb(110, 73, 41), rgb(127, 85, 48), rgb(67, 44, 25),
    rgb(78, 1, 0), rgb(95, 1, 0), rgb(111, 2, 0), rgb(58, 1, 0),
];

/// Base color group names, one per group of [`SHADES`] entries.
///
/// Names follow the map color groups of the pre-1.12 game; most dyed groups
/// also cover wool, carpet and stained clay of that color.
pub const MATERIALS: [&str; PALETTE_SIZE / SHADES] = [
    "Transparent", "Grass", "Sand/Gravel", "Other", "Lava/TNT", "Ice", "Metal",
    "Plants", "White", "Clay", "Dirt", "Stone", "Water", "Wood", "Diorite",
    "Orange", "Magenta", "Light Blue", "Yellow", "Lime", "Pink", "Gray",
    "Light Gray", "Cyan", "Purple", "Blue", "Brown", "Green", "Red", "Black", "Gold", "Diamond",
    "Lapis", "Emerald", "Obsidian", "Netherrack",
];

/// Look up a palette entry; `None` for indices past the table
pub fn color(index: u8) -> Option<PaletteEntry> {
    PALETTE.get(usize::from(index)).copied()
}

/// Material name of the base color an index belongs to
pub fn material_name(index: u8) -> Option<&'static str> {
    MATERIALS.get(usize::from(index) / SHADES).copied()
}

/// Render an indexed color buffer into an RGBA image.
///
/// `colors` is row-major and must hold exactly `width * height` bytes.
/// Every byte must be a valid palette index.
pub fn render(colors: &[u8], width: i32, height: i32) -> Result<RgbaImage> {
    let mismatch = || DecodeError::DimensionMismatch {
        width,
        height,
        actual: colors.len(),
    };

    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(mismatch()),
    };
    let expected = (w as usize).checked_mul(h as usize).ok_or_else(mismatch)?;
    if colors.len() != expected {
        return Err(mismatch());
    }

    let mut pixels = Vec::with_capacity(expected * 4);
    for &index in colors {
        let entry = color(index).ok_or(DecodeError::PaletteIndexOutOfRange(index))?;
        pixels.extend_from_slice(&entry.to_rgba().0);
    }

    RgbaImage::from_raw(w, h, pixels).ok_or_else(mismatch)
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write an image to disk as PNG, whatever the file extension
pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Pixel count for one material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorUsage {
    pub material: &'static str,
    pub pixels: usize,
}

/// Count pixels per material, most used first.
///
/// Indices outside the palette are not counted.
pub fn color_usage(colors: &[u8]) -> Vec<ColorUsage> {
    let mut counts = [0usize; PALETTE_SIZE / SHADES];
    for &index in colors {
        if let Some(slot) = counts.get_mut(usize::from(index) / SHADES) {
            *slot += 1;
        }
    }

    let mut usage: Vec<ColorUsage> = counts
        .iter()
        .zip(MATERIALS)
        .filter(|(count, _)| **count > 0)
        .map(|(&pixels, material)| ColorUsage { material, pixels })
        .collect();
    usage.sort_by(|a, b| b.pixels.cmp(&a.pixels).then(a.material.cmp(b.material)));
    usage
}
