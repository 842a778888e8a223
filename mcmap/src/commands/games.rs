//! `games` command

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use super::SavesArgs;

#[derive(Args)]
pub struct GamesArgs {
    #[command(flatten)]
    pub saves: SavesArgs,
}

pub fn execute(args: GamesArgs) -> Result<()> {
    let saves_dir = args.saves.resolve()?;
    let games = mcmap_map::list_games(&saves_dir)
        .with_context(|| format!("Failed to list worlds in {}", saves_dir.display()))?;

    if games.is_empty() {
        println!("No worlds found in {}", saves_dir.display());
        return Ok(());
    }

    for game in games {
        println!("{}", style(&game.name).cyan());
    }
    Ok(())
}
