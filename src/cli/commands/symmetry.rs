//! Symmetry command - the 8 D4 images of a board and its canonical key

use anyhow::Result;
use clap::Parser;

use super::parse_state;
use crate::{
    cli::output::{indent, print_kv, print_section},
    tictactoe::{BoardState, D4Transform},
};

#[derive(Parser, Debug)]
#[command(about = "Show the symmetry class of a board")]
pub struct SymmetryArgs {
    /// Board to analyze, e.g. "X-- -O- ---" (defaults to the empty board)
    #[arg(long)]
    pub state: Option<String>,
}

/// Number of group elements mapping the board onto itself
pub fn stabilizer_size(board: &BoardState) -> usize {
    D4Transform::ALL
        .iter()
        .filter(|t| board.transform(t) == *board)
        .count()
}

pub fn execute(args: SymmetryArgs) -> Result<()> {
    let board = parse_state(args.state.as_deref())?;
    let ctx = board.canonical_context();

    print_section("Symmetry class");
    println!("{}", indent(&board.to_string(), 2));
    print_kv("Exact key", &board.exact_key().to_string());
    print_kv("Canonical key", &ctx.key.to_string());
    print_kv("Canonical via", &ctx.transform.to_string());
    print_kv("Stabilizer size", &stabilizer_size(&board).to_string());
    print_kv(
        "Distinct images",
        &(D4Transform::ALL.len() / stabilizer_size(&board)).to_string(),
    );

    for (i, transform) in D4Transform::ALL.iter().enumerate() {
        let image = board.transform(transform);
        let marker = if image.exact_key() == ctx.key {
            " (canonical)"
        } else {
            ""
        };
        println!("\n{}. {transform}{marker}", i + 1);
        println!("{}", indent(&image.to_string(), 2));
    }

    Ok(())
}
