//! Tic-Tac-Toe state space: boards, symmetry, tree construction and solving

pub mod board;
pub mod game_tree;
pub mod lines;
pub mod naive;
pub mod solver;
pub mod symmetry;

pub use board::{BoardKey, BoardState, CanonicalContext, Cell, Player};
pub use game_tree::{Edge, GameTree, LAST_PLY, Level, Node};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use naive::{NaiveNode, NaiveTree};
pub use solver::{Outcome, solve};
pub use symmetry::{D4Transform, Rotation, flip_horizontal, rotate_180, rotate_ccw, rotate_cw};
