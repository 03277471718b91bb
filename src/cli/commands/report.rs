//! Report command - node counts for every builder variant plus the best
//! moves of the first ply

use anyhow::Result;
use clap::Parser;

use super::count::collect;
use crate::{
    cli::output::{format_number, print_section},
    config::TreeConfig,
    tictactoe::{GameTree, solve},
};

#[derive(Parser, Debug)]
#[command(about = "Compare every builder variant and list first-ply best moves")]
pub struct ReportArgs {
    /// Skip the naive trees (they hold up to ~1M nodes)
    #[arg(long)]
    pub skip_naive: bool,
}

pub fn execute(args: ReportArgs) -> Result<()> {
    print_section("Node counts");

    let builders: &[bool] = if args.skip_naive {
        &[false]
    } else {
        &[true, false]
    };
    for &naive in builders {
        for config in TreeConfig::variants() {
            let counts = collect(config, naive)?;
            println!(
                "Board states, {} tree, {}: {}",
                counts.builder,
                counts.config,
                format_number(counts.total)
            );
            println!(
                "Last turn, {} tree, {}: {}",
                counts.builder,
                counts.config,
                format_number(counts.last_ply())
            );
        }
    }

    print_section("First-ply best moves (fully compressed)");
    let mut tree = GameTree::build(TreeConfig::full())?;
    solve(&mut tree)?;
    if let Some(level) = tree.level(1) {
        for node in level.nodes() {
            println!(
                "{}  {:<6}  {:?}",
                node.board().compact(),
                node.value().to_string(),
                node.best_moves()
            );
        }
    }

    Ok(())
}
