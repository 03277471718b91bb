//! Backward induction over a completed [`GameTree`]

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{
    Player,
    game_tree::{GameTree, LAST_PLY, Node},
};
use crate::error::{Error, Result};

/// Game-theoretic value of a position under perfect play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Unresolved,
    Tie,
    XWins,
    OWins,
}

impl Outcome {
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::X => Outcome::XWins,
            Player::O => Outcome::OWins,
        }
    }

    pub fn is_resolved(self) -> bool {
        self != Outcome::Unresolved
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Unresolved => "unresolved",
            Outcome::Tie => "tie",
            Outcome::XWins => "X wins",
            Outcome::OWins => "O wins",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone)]
struct Resolution {
    value: Outcome,
    best_moves: Vec<usize>,
}

impl Resolution {
    fn terminal(value: Outcome) -> Self {
        Self {
            value,
            best_moves: Vec::new(),
        }
    }
}

/// Assign every state in `tree` its value and best moves.
///
/// Plies are processed from the full board back to the root, so every child
/// is resolved before any parent reads it. The mover takes a win if one
/// exists, otherwise a tie, otherwise every move loses equally.
///
/// The whole pass is computed before anything is written: a failing pass
/// leaves the tree untouched. Solving an already solved tree recomputes the
/// same annotations and leaves them as they are.
///
/// # Errors
///
/// - [`Error::IncompleteTree`] if the tree does not reach ply 9
/// - [`Error::InconsistentTree`] if an interior non-terminal state has no
///   children
/// - [`Error::UnresolvedChild`] if an edge points at a state without a value
/// - [`Error::ValueConflict`] if a previously assigned value disagrees
pub fn solve(tree: &mut GameTree) -> Result<()> {
    if !tree.is_complete() {
        return Err(Error::IncompleteTree {
            last_ply: tree.last_ply(),
        });
    }

    let first_ply = tree.first_ply();
    let mut scratch: Vec<Vec<Resolution>> = vec![Vec::new(); tree.levels.len()];

    for local in (0..tree.levels.len()).rev() {
        let ply = first_ply + local;
        let (current, below) = scratch.split_at_mut(local + 1);
        let children = below.first().map(Vec::as_slice).unwrap_or_default();

        current[local] = tree.levels[local]
            .nodes()
            .iter()
            .map(|node| resolve(node, ply, children))
            .collect::<Result<_>>()?;

        debug!("resolved ply {ply}: {}", summarize(&current[local]));
    }

    for (local, (level, resolutions)) in tree.levels.iter().zip(&scratch).enumerate() {
        for (node, resolution) in level.nodes().iter().zip(resolutions) {
            node.check_assignable(first_ply + local, resolution.value, &resolution.best_moves)?;
        }
    }

    for (level, resolutions) in tree.levels.iter_mut().zip(scratch) {
        for (node, resolution) in level.nodes_mut().iter_mut().zip(resolutions) {
            node.assign(resolution.value, resolution.best_moves);
        }
    }

    info!(
        "solved {} states, root {} is {}",
        tree.node_count(),
        tree.root().board().compact(),
        tree.root().value()
    );
    Ok(())
}

fn resolve(node: &Node, ply: usize, children: &[Resolution]) -> Result<Resolution> {
    let board = node.board();

    if let Some(winner) = board.winner() {
        return Ok(Resolution::terminal(Outcome::win_for(winner)));
    }
    if ply == LAST_PLY {
        return Ok(Resolution::terminal(Outcome::Tie));
    }
    if node.children().is_empty() {
        return Err(Error::InconsistentTree {
            ply,
            board: board.compact(),
        });
    }

    let mover = Outcome::win_for(board.to_move);
    let mut wins = Vec::new();
    let mut ties = Vec::new();
    let mut losses = Vec::new();

    for (index, edge) in node.children().iter().enumerate() {
        let value = children
            .get(edge.child)
            .map(|child| child.value)
            .filter(|value| value.is_resolved())
            .ok_or_else(|| Error::UnresolvedChild {
                ply,
                board: board.compact(),
                child: index,
            })?;

        match value {
            v if v == mover => wins.push(index),
            Outcome::Tie => ties.push(index),
            _ => losses.push(index),
        }
    }

    let resolution = if !wins.is_empty() {
        Resolution {
            value: mover,
            best_moves: wins,
        }
    } else if !ties.is_empty() {
        Resolution {
            value: Outcome::Tie,
            best_moves: ties,
        }
    } else {
        Resolution {
            value: Outcome::win_for(board.to_move.opponent()),
            best_moves: losses,
        }
    };
    Ok(resolution)
}

fn summarize(resolutions: &[Resolution]) -> String {
    let count = |outcome| resolutions.iter().filter(|r| r.value == outcome).count();
    format!(
        "{} X wins, {} O wins, {} ties",
        count(Outcome::XWins),
        count(Outcome::OWins),
        count(Outcome::Tie)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TreeConfig,
        tictactoe::{BoardState, Edge},
    };

    #[test]
    fn incomplete_tree_is_rejected() {
        let mut tree = GameTree::new(TreeConfig::full());
        tree.expand(0).unwrap();
        assert!(matches!(
            solve(&mut tree),
            Err(Error::IncompleteTree { last_ply: 1 })
        ));
        assert_eq!(tree.root().value(), Outcome::Unresolved);
    }

    #[test]
    fn full_board_root_is_terminal() {
        let board = BoardState::from_string("XOX XOO OXX").unwrap();
        let mut tree = GameTree::build_from(board, TreeConfig::full()).unwrap();
        solve(&mut tree).unwrap();
        assert_eq!(tree.root().value(), Outcome::Tie);
        assert!(tree.root().best_moves().is_empty());
    }

    #[test]
    fn won_position_takes_winner_value() {
        let board = BoardState::from_string("XXX OO- ---").unwrap();
        let mut tree = GameTree::build_from(board, TreeConfig::full()).unwrap();
        solve(&mut tree).unwrap();
        assert_eq!(tree.root().value(), Outcome::XWins);
    }

    #[test]
    fn last_move_forced() {
        // X to move with one empty cell, which completes the main diagonal
        let board = BoardState::from_string("XOX OXO OX-").unwrap();
        let mut tree = GameTree::build_from(board, TreeConfig::full()).unwrap();
        solve(&mut tree).unwrap();
        let root = tree.root();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.value(), Outcome::XWins);
        assert_eq!(root.best_moves(), &[0]);
    }

    #[test]
    fn forced_loss_keeps_every_move() {
        // O to move, X threatens both 2 (top row) and 6 (left column)
        let board = BoardState::from_string("XX- XOO ---").unwrap();
        let mut tree = GameTree::build_from(board, TreeConfig::full()).unwrap();
        solve(&mut tree).unwrap();
        let root = tree.root();
        assert_eq!(root.value(), Outcome::XWins);
        assert_eq!(root.best_moves().len(), root.children().len());
    }

    #[test]
    fn childless_interior_state_is_inconsistent() {
        // a tree built without expanding past ply 4 but marked complete by
        // splicing empty levels behind it
        let mut tree = GameTree::new(TreeConfig::full());
        for ply in 0..4 {
            tree.expand(ply).unwrap();
        }
        while !tree.is_complete() {
            tree.levels.push(Default::default());
        }
        assert!(matches!(
            solve(&mut tree),
            Err(Error::InconsistentTree { ply: 4, .. })
        ));
        assert!(
            tree.levels
                .iter()
                .flat_map(|level| level.nodes())
                .all(|node| !node.value().is_resolved())
        );
    }

    #[test]
    fn dangling_edge_is_unresolved() {
        let mut tree = GameTree::build(TreeConfig::full()).unwrap();
        tree.levels[0].nodes_mut()[0]
            .children
            .push(Edge { position: 0, child: 999 });

        assert!(matches!(
            solve(&mut tree),
            Err(Error::UnresolvedChild {
                ply: 0,
                child: 9,
                ..
            })
        ));
        assert!(
            tree.levels
                .iter()
                .flat_map(|level| level.nodes())
                .all(|node| !node.value().is_resolved())
        );
    }

    #[test]
    fn conflicting_reassignment_is_rejected() {
        let mut tree = GameTree::build(TreeConfig::full()).unwrap();
        solve(&mut tree).unwrap();

        let tampered = match tree.node(3, 0).unwrap().value() {
            Outcome::Tie => Outcome::OWins,
            _ => Outcome::Tie,
        };
        tree.levels[3].nodes_mut()[0].value = tampered;

        assert!(matches!(
            solve(&mut tree),
            Err(Error::ValueConflict { ply: 3, .. })
        ));
        assert_eq!(tree.root().value(), Outcome::Tie);
        assert_eq!(tree.node(3, 0).unwrap().value(), tampered);
    }
}
