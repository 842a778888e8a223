//! `tree` command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::utils::tree::{TreeNode, TreeOptions, render_tree};

#[derive(Args)]
pub struct TreeArgs {
    /// Path to the NBT file
    pub file: PathBuf,

    /// Maximum depth to display
    #[arg(long)]
    pub depth: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub fn execute(args: TreeArgs) -> Result<()> {
    let file = mcmap_nbt::read_file(&args.file)
        .with_context(|| format!("Failed to parse NBT file: {}", args.file.display()))?;

    let root = TreeNode::from_document(&file);
    let options = TreeOptions {
        max_depth: args.depth,
        no_color: args.no_color,
    };
    print!("{}", render_tree(&root, &options));
    Ok(())
}
