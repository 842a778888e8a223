//! Root CLI structure for mcmap

use clap::{Parser, Subcommand};

use crate::commands::{
    export::ExportArgs, games::GamesArgs, info::InfoArgs, maps::MapsArgs, render::RenderArgs,
    tree::TreeArgs,
};

#[derive(Parser)]
#[command(name = "mcmap")]
#[command(about = "Command-line tools for Minecraft map item files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the worlds in the saves directory
    Games(GamesArgs),

    /// List the maps of a world
    Maps(MapsArgs),

    /// Display information about a map file
    Info(InfoArgs),

    /// Render a map file to PNG
    Render(RenderArgs),

    /// Render every map of a world to PNG
    Export(ExportArgs),

    /// Show the raw tag tree of an NBT file
    Tree(TreeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
