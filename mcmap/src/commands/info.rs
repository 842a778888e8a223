//! `info` command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use mcmap_map::{MapRecord, palette};
use mcmap_nbt::Compression;
use std::fs;
use std::path::PathBuf;

use crate::utils::{add_table_row, create_table, format_bytes, format_percentage};

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the map file
    pub file: PathBuf,

    /// Show pixel counts per material
    #[arg(long)]
    pub colors: bool,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let path = &args.file;
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let file = mcmap_nbt::parse(&bytes)
        .with_context(|| format!("Failed to parse NBT file: {}", path.display()))?;
    let record = MapRecord::decode(&file)
        .with_context(|| format!("Failed to decode map file: {}", path.display()))?;

    println!("\n{}", style("Map File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Size: {} ({})",
        style(format_bytes(bytes.len() as u64)).green(),
        Compression::detect(&bytes).name()
    );
    println!(
        "Dimensions: {}x{}",
        style(record.width()).green(),
        style(record.height()).green()
    );
    println!(
        "Scale: {} (1:{})",
        style(record.scale()).yellow(),
        blocks_per_pixel(record.scale())
    );
    println!("Dimension: {}", dimension_name(record.dimension()));
    println!(
        "Center: {}",
        style(format!("{},{}", record.x_center(), record.z_center())).cyan()
    );

    let borders = record.borders();
    println!("\n{}", style("Borders").bold());
    println!("Top left: {}", borders.top_left);
    println!("Top right: {}", borders.top_right);
    println!("Bottom left: {}", borders.bottom_left);
    println!("Bottom right: {}", borders.bottom_right);

    if args.colors {
        show_color_usage(&record);
    }

    Ok(())
}

fn show_color_usage(record: &MapRecord) {
    let total = record.colors().len();
    let usage = palette::color_usage(record.colors());

    println!("\n{}", style("Color Usage").bold());
    if usage.is_empty() {
        println!("{}", style("No pixels").dim());
        return;
    }

    let mut table = create_table(vec!["Material", "Pixels", "Share"]);
    for entry in usage {
        add_table_row(
            &mut table,
            vec![
                entry.material.to_string(),
                entry.pixels.to_string(),
                format_percentage(entry.pixels as f64 / total as f64 * 100.0),
            ],
        );
    }
    table.printstd();
}

/// Blocks covered by one pixel side at a zoom level
fn blocks_per_pixel(scale: u8) -> u64 {
    1u64.checked_shl(u32::from(scale)).unwrap_or(u64::MAX)
}

fn dimension_name(dimension: i8) -> String {
    match dimension {
        0 => "Overworld".to_string(),
        -1 => "Nether".to_string(),
        1 => "End".to_string(),
        other => format!("Unknown ({other})"),
    }
}
