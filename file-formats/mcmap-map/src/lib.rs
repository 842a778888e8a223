//! Decoder and renderer for Minecraft map item files.
//!
//! The game stores every filled map as `data/map_<n>.dat` inside a world's
//! save directory: a gzip-compressed NBT document holding the map's scale,
//! center, size and a buffer of palette indices. This crate turns those
//! files into RGBA images and world-space footprints, and lists the maps of
//! a world.
//!
//! # Examples
//!
//! ```no_run
//! use mcmap_map::{SortOrder, list_games, default_saves_dir};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for game in list_games(default_saves_dir()?)? {
//!     for entry in game.list_maps(SortOrder::Level)? {
//!         println!("{} {} level {}", game.name, entry.name, entry.level);
//!     }
//! }
//!
//! let map = mcmap_map::load_map("saves/World/data/map_0.dat")?;
//! let borders = map.borders();
//! println!("top left at {}", borders.top_left);
//! mcmap_map::save_png(&map.render()?, "map_0.png")?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod record;

pub use catalog::{
    CatalogEntry, DirectoryLister, FsLister, GameDir, MapCatalog, SortOrder, default_saves_dir,
    list_games, list_maps, load_map_entry,
};
pub use error::{CatalogError, DecodeError, Result};
pub use geometry::{BorderSet, Corner, borders};
pub use palette::{PALETTE, PaletteEntry, encode_png, render, save_png};
pub use record::{MapRecord, MapSummary, UNKNOWN, load_map, load_summary};
