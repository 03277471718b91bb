//! Naive game tree without cross-parent deduplication.
//!
//! Every move sequence gets its own node, so node counts grow factorially.
//! Only used to validate the counts of [`GameTree`](super::GameTree).

use std::ops::Range;

use log::debug;

use super::{board::BoardState, game_tree::LAST_PLY};
use crate::{
    config::TreeConfig,
    error::{Error, Result},
};

/// One move sequence. Its children are a contiguous run of the next level,
/// since each parent appends all of its successors at once.
#[derive(Debug, Clone)]
pub struct NaiveNode {
    pub board: BoardState,
    pub children: Range<usize>,
}

/// Tree of move sequences, one `Vec` per ply.
///
/// With `filter_transforms` a successor is dropped only when it is equivalent
/// to one of its own earlier siblings; nothing is shared across parents.
#[derive(Debug, Clone)]
pub struct NaiveTree {
    config: TreeConfig,
    levels: Vec<Vec<NaiveNode>>,
}

impl NaiveTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            levels: vec![vec![NaiveNode {
                board: BoardState::new(),
                children: 0..0,
            }]],
        }
    }

    pub fn build(config: TreeConfig) -> Result<Self> {
        let mut tree = Self::new(config);
        for ply in 0..LAST_PLY {
            tree.expand(ply)?;
        }
        Ok(tree)
    }

    /// Append the successors of every node at `ply`, which must be the
    /// current frontier.
    pub fn expand(&mut self, ply: usize) -> Result<()> {
        let frontier = self.levels.len() - 1;
        if ply != frontier || ply >= LAST_PLY {
            return Err(Error::LevelOutOfRange { ply, frontier });
        }

        let config = self.config;
        let mut next = Vec::new();
        let mut siblings = Vec::with_capacity(9);

        for parent in self.levels[ply].iter_mut() {
            let start = next.len();
            if !(config.check_winner && parent.board.is_terminal()) {
                siblings.clear();
                for position in parent.board.legal_moves() {
                    let board = parent.board.make_move(position)?;
                    if config.filter_transforms {
                        let key = board.canonical_key();
                        if siblings.contains(&key) {
                            continue;
                        }
                        siblings.push(key);
                    }
                    next.push(NaiveNode {
                        board,
                        children: 0..0,
                    });
                }
            }
            parent.children = start..next.len();
        }

        debug!("naive ply {}: {} nodes", ply + 1, next.len());
        self.levels.push(next);
        Ok(())
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    pub fn level(&self, ply: usize) -> Option<&[NaiveNode]> {
        self.levels.get(ply).map(Vec::as_slice)
    }

    pub fn level_len(&self, ply: usize) -> usize {
        self.levels.get(ply).map_or(0, Vec::len)
    }

    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}
