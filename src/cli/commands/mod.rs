//! Subcommands of the `tictactoe-space` binary

use anyhow::Result;
use clap::Args;

use crate::{config::TreeConfig, tictactoe::BoardState};

pub mod count;
pub mod report;
pub mod solve;
pub mod symmetry;

/// Flags selecting how the state space is built
#[derive(Args, Debug, Clone, Copy)]
pub struct TreeArgs {
    /// Keep expanding positions that already have a winner
    #[arg(long)]
    pub no_check_winner: bool,

    /// Merge only identical positions, not symmetric ones
    #[arg(long)]
    pub no_symmetry: bool,
}

impl TreeArgs {
    pub fn config(&self) -> TreeConfig {
        TreeConfig::new(!self.no_check_winner, !self.no_symmetry)
    }
}

/// Parse an optional `--state` board, defaulting to the empty board
pub(crate) fn parse_state(state: Option<&str>) -> Result<BoardState> {
    match state {
        Some(s) => Ok(BoardState::from_string(s)?),
        None => Ok(BoardState::new()),
    }
}
