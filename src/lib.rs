//! Exhaustive Tic-Tac-Toe state space analysis
//!
//! This crate provides:
//! - Board states with legal move generation and winner detection
//! - The D4 symmetry group and canonical keys for equivalent boards
//! - A level-by-level game DAG that merges equivalent positions
//! - Backward induction assigning every position its value and best moves
//! - A naive per-sequence tree used to validate node counts
//!
//! ```
//! use tictactoe_space::{GameTree, Outcome, TreeConfig, solve};
//!
//! let mut tree = GameTree::build(TreeConfig::full()).unwrap();
//! solve(&mut tree).unwrap();
//! assert_eq!(tree.root().value(), Outcome::Tie);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod tictactoe;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use tictactoe::{BoardState, GameTree, NaiveTree, Outcome, solve};
