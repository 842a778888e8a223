//! `render` command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RenderArgs {
    /// Path to the map file
    pub file: PathBuf,

    /// Output PNG path (defaults to <file stem>.png in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| default_output(&args.file));

    let record = mcmap_map::load_map(&args.file)
        .with_context(|| format!("Failed to load map: {}", args.file.display()))?;
    let image = record
        .render()
        .with_context(|| format!("Failed to render map: {}", args.file.display()))?;
    mcmap_map::save_png(&image, &output)
        .with_context(|| format!("Failed to write image: {}", output.display()))?;

    println!(
        "Rendered {} ({}x{}) to {}",
        style(args.file.display()).cyan(),
        image.width(),
        image.height(),
        style(output.display()).green()
    );
    Ok(())
}

/// `<stem>.png`, relative to the working directory
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    PathBuf::from(format!("{stem}.png"))
}
