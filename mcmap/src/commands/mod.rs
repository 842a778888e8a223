//! Command implementations

pub mod export;
pub mod games;
pub mod info;
pub mod maps;
pub mod render;
pub mod tree;

use anyhow::{Context, Result, bail};
use clap::Args;
use mcmap_map::GameDir;
use std::path::PathBuf;

/// Location of the saves directory, shared by the world-level commands
#[derive(Args, Debug, Clone)]
pub struct SavesArgs {
    /// Minecraft saves directory (defaults to the platform location)
    #[arg(long, env = "MCMAP_SAVES_DIR", value_name = "DIR")]
    pub saves_dir: Option<PathBuf>,
}

impl SavesArgs {
    /// The saves directory given on the command line or the platform default
    pub fn resolve(&self) -> Result<PathBuf> {
        match &self.saves_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let dir = mcmap_map::default_saves_dir()
                    .context("Failed to locate the saves directory, use --saves-dir")?;
                log::info!("Using saves directory {}", dir.display());
                Ok(dir)
            }
        }
    }

    /// Find a world by directory name
    pub fn find_game(&self, name: &str) -> Result<GameDir> {
        let saves_dir = self.resolve()?;
        let games = mcmap_map::list_games(&saves_dir)
            .with_context(|| format!("Failed to list worlds in {}", saves_dir.display()))?;

        match games.into_iter().find(|g| g.name == name) {
            Some(game) => Ok(game),
            None => bail!("No world named '{}' in {}", name, saves_dir.display()),
        }
    }
}
