//! Solve command - backward induction and best-move listings

use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;

use super::{TreeArgs, parse_state};
use crate::{
    cli::output::{format_number, indent, print_kv, print_section},
    tictactoe::{GameTree, LAST_PLY, Node, Outcome, Player, solve},
};

#[derive(Parser, Debug)]
#[command(about = "Solve the game by backward induction")]
pub struct SolveArgs {
    /// Board to solve from, e.g. "XX- OO- ---" (defaults to the empty board)
    #[arg(long)]
    pub state: Option<String>,

    #[command(flatten)]
    pub tree: TreeArgs,

    /// Ply whose states are listed (defaults to the ply after the root)
    #[arg(long)]
    pub ply: Option<usize>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Solver annotations of one state
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    pub index: usize,
    pub board: String,
    pub to_move: Player,
    pub value: Outcome,
    pub best_moves: Vec<usize>,
    pub best_positions: Vec<usize>,
}

impl NodeReport {
    pub fn new(index: usize, node: &Node) -> Self {
        Self {
            index,
            board: node.board().compact(),
            to_move: node.board().to_move,
            value: node.value(),
            best_moves: node.best_moves().to_vec(),
            best_positions: node.best_positions().collect(),
        }
    }
}

/// Reports for every state at `ply` of a solved tree
pub fn level_report(tree: &GameTree, ply: usize) -> Vec<NodeReport> {
    tree.level(ply)
        .map(|level| {
            level
                .nodes()
                .iter()
                .enumerate()
                .map(|(index, node)| NodeReport::new(index, node))
                .collect()
        })
        .unwrap_or_default()
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let root = parse_state(args.state.as_deref())?;
    let mut tree = GameTree::build_from(root, args.tree.config())?;
    solve(&mut tree)?;

    let ply = args.ply.unwrap_or((tree.first_ply() + 1).min(LAST_PLY));
    if tree.level(ply).is_none() {
        bail!(
            "ply {ply} is outside the solved range {}..={}",
            tree.first_ply(),
            tree.last_ply()
        );
    }
    let reports = level_report(&tree, ply);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    print_section(&format!("Solved tree ({})", tree.config()));
    println!("{}", indent(&root.to_string(), 2));
    print_kv("Root value", &tree.root().value().to_string());
    print_kv("States", &format_number(tree.node_count()));
    print_kv(
        "Best moves",
        &format!("{:?}", tree.root().best_positions().collect::<Vec<_>>()),
    );

    print_section(&format!("Ply {ply}: {} states", format_number(reports.len())));
    for report in &reports {
        println!(
            "#{:<4} {}  {} to move  {:<8}  best children {:?}  cells {:?}",
            report.index,
            report.board,
            report.to_move,
            report.value.to_string(),
            report.best_moves,
            report.best_positions
        );
    }

    Ok(())
}
