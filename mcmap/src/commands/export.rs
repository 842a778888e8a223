//! `export` command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

use super::SavesArgs;
use super::render::default_output;
use crate::utils::create_progress_bar;

#[derive(Args)]
pub struct ExportArgs {
    /// World directory name
    pub game: String,

    #[command(flatten)]
    pub saves: SavesArgs,

    /// Output directory (defaults to a directory named after the world)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let game = args.saves.find_game(&args.game)?;
    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&game.name));

    let catalog = game
        .catalog()
        .with_context(|| format!("Failed to list maps of {}", game.name))?;
    if catalog.is_empty() {
        println!("No maps found in {}", catalog.dir().display());
        return Ok(());
    }

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let pb = create_progress_bar(catalog.len() as u64, "Rendering maps");
    let mut exported = 0usize;
    let mut failed = 0usize;

    for path in catalog.paths() {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(format!("Rendering: {name}"));

        match export_map(path, &output_dir) {
            Ok(path) => {
                log::debug!("Wrote {}", path.display());
                exported += 1;
            }
            Err(e) => {
                log::warn!("Failed to export {}: {:#}", name, e);
                failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    println!(
        "Exported {} maps to {}",
        style(exported).green(),
        style(output_dir.display()).cyan()
    );
    if failed > 0 {
        println!("{} maps could not be rendered", style(failed).red());
    }
    Ok(())
}

/// Decode, render and write one map
fn export_map(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let record = mcmap_map::load_map(input)?;
    let image = record.render()?;
    let path = output_dir.join(default_output(input));
    mcmap_map::save_png(&image, &path)?;
    Ok(path)
}
