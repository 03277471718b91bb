//! Count command - distinct states per ply

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use super::TreeArgs;
use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section},
    config::TreeConfig,
    tictactoe::{GameTree, NaiveTree},
};

#[derive(Parser, Debug)]
#[command(about = "Count distinct states per ply")]
pub struct CountArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Use the naive per-sequence tree instead of the deduplicated one
    #[arg(long)]
    pub naive: bool,

    /// Print counts as JSON
    #[arg(long)]
    pub json: bool,
}

/// Node counts of one built tree
#[derive(Debug, Clone, Serialize)]
pub struct LevelCounts {
    pub builder: &'static str,
    pub config: TreeConfig,
    pub per_ply: Vec<usize>,
    pub total: usize,
}

impl LevelCounts {
    pub fn hashed(tree: &GameTree) -> Self {
        Self {
            builder: "hashed",
            config: tree.config(),
            per_ply: tree.level_sizes(),
            total: tree.node_count(),
        }
    }

    pub fn naive(tree: &NaiveTree) -> Self {
        Self {
            builder: "naive",
            config: tree.config(),
            per_ply: tree.level_sizes(),
            total: tree.node_count(),
        }
    }

    /// States at the full-board ply
    pub fn last_ply(&self) -> usize {
        self.per_ply.last().copied().unwrap_or_default()
    }
}

/// Build a tree with the given builder and collect its counts
pub fn collect(config: TreeConfig, naive: bool) -> Result<LevelCounts> {
    if naive {
        let spinner = create_spinner(&format!("Building naive tree ({config})..."))?;
        let tree = NaiveTree::build(config)?;
        spinner.finish_and_clear();
        Ok(LevelCounts::naive(&tree))
    } else {
        Ok(LevelCounts::hashed(&GameTree::build(config)?))
    }
}

pub fn execute(args: CountArgs) -> Result<()> {
    let counts = collect(args.tree.config(), args.naive)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    print_section(&format!("Board states, {} tree, {}", counts.builder, counts.config));
    for (ply, count) in counts.per_ply.iter().enumerate() {
        print_kv(&format!("Ply {ply}"), &format_number(*count));
    }
    print_kv("Total", &format_number(counts.total));

    Ok(())
}
