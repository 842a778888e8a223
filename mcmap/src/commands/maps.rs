//! `maps` command

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mcmap_map::{CatalogEntry, SortOrder, UNKNOWN};

use super::SavesArgs;
use crate::utils::{add_table_row, create_table};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Map number from the file name
    #[default]
    Id,
    /// Zoom level, unknown levels first
    Level,
}

impl From<SortKey> for SortOrder {
    fn from(value: SortKey) -> Self {
        match value {
            SortKey::Id => SortOrder::MapId,
            SortKey::Level => SortOrder::Level,
        }
    }
}

#[derive(Args)]
pub struct MapsArgs {
    /// World directory name
    pub game: String,

    #[command(flatten)]
    pub saves: SavesArgs,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortKey::Id)]
    pub sort: SortKey,
}

pub fn execute(args: MapsArgs) -> Result<()> {
    let game = args.saves.find_game(&args.game)?;
    let entries = game
        .list_maps(args.sort.into())
        .with_context(|| format!("Failed to list maps of {}", game.name))?;

    if entries.is_empty() {
        println!("No maps found in {}", game.data_dir().display());
        return Ok(());
    }

    let mut table = create_table(vec!["File", "Id", "Level", "Center"]);
    for entry in &entries {
        add_table_row(
            &mut table,
            vec![
                entry.name.clone(),
                entry.map_id.to_string(),
                level_cell(entry),
                center_cell(entry),
            ],
        );
    }
    table.printstd();
    Ok(())
}

fn level_cell(entry: &CatalogEntry) -> String {
    if entry.has_level() {
        entry.level.to_string()
    } else {
        "?".to_string()
    }
}

fn center_cell(entry: &CatalogEntry) -> String {
    if entry.x_center == UNKNOWN && entry.z_center == UNKNOWN {
        "?".to_string()
    } else {
        format!("{},{}", entry.x_center, entry.z_center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(level: i32, x_center: i32, z_center: i32) -> CatalogEntry {
        CatalogEntry {
            path: PathBuf::from("map_0.dat"),
            name: "map_0.dat".to_string(),
            map_id: 0,
            level,
            x_center,
            z_center,
        }
    }

    #[test]
    fn test_unknown_cells() {
        let unknown = entry(UNKNOWN, UNKNOWN, UNKNOWN);
        assert_eq!(level_cell(&unknown), "?");
        assert_eq!(center_cell(&unknown), "?");

        let known = entry(2, -64, 128);
        assert_eq!(level_cell(&known), "2");
        assert_eq!(center_cell(&known), "-64,128");
    }

    #[test]
    fn test_sort_key_conversion() {
        assert_eq!(SortOrder::from(SortKey::Id), SortOrder::MapId);
        assert_eq!(SortOrder::from(SortKey::Level), SortOrder::Level);
    }
}
