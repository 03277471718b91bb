//! Level-by-level construction of the deduplicated game DAG

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use super::{
    board::{BoardKey, BoardState},
    solver::Outcome,
};
use crate::{
    config::TreeConfig,
    error::{Error, Result},
};

/// The last ply of any game: a full board
pub const LAST_PLY: usize = 9;

/// A move from a parent to a state in the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Cell played by the parent's mover
    pub position: usize,
    /// Index of the resulting state in the next level's arena
    pub child: usize,
}

/// A state owned by a level arena, with its solver annotations
#[derive(Debug, Clone)]
pub struct Node {
    board: BoardState,
    pub(crate) value: Outcome,
    best_moves: Vec<usize>,
    pub(crate) children: Vec<Edge>,
}

impl Node {
    pub fn new(board: BoardState) -> Self {
        Self {
            board,
            value: Outcome::Unresolved,
            best_moves: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn value(&self) -> Outcome {
        self.value
    }

    /// Indices into [`Node::children`] that realize [`Node::value`]
    pub fn best_moves(&self) -> &[usize] {
        &self.best_moves
    }

    pub fn children(&self) -> &[Edge] {
        &self.children
    }

    /// Cells played by the best moves, in child order
    pub fn best_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.best_moves
            .iter()
            .filter_map(|&idx| self.children.get(idx).map(|edge| edge.position))
    }

    /// Single assignment: an already resolved node only accepts the
    /// annotation it already carries.
    pub(crate) fn check_assignable(&self, ply: usize, value: Outcome, best: &[usize]) -> Result<()> {
        if self.value.is_resolved() && (self.value != value || self.best_moves != best) {
            return Err(Error::ValueConflict {
                ply,
                board: self.board.compact(),
                existing: self.value.to_string(),
                computed: value.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn assign(&mut self, value: Outcome, best_moves: Vec<usize>) {
        if !self.value.is_resolved() {
            self.value = value;
            self.best_moves = best_moves;
        }
    }
}

/// All distinct states of one ply.
///
/// States live in an insertion-ordered arena; the key index only answers
/// "is this position already here", so traversal never depends on hash order.
#[derive(Debug, Clone, Default)]
pub struct Level {
    nodes: Vec<Node>,
    index: HashMap<BoardKey, usize>,
}

impl Level {
    fn with_root(key: BoardKey, board: BoardState) -> Self {
        let mut level = Self::default();
        level.insert_if_absent(key, board);
        level
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Arena index of the state stored under `key`
    pub fn lookup(&self, key: &BoardKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// First writer wins: an equivalent state already present is reused.
    fn insert_if_absent(&mut self, key: BoardKey, board: BoardState) -> usize {
        let nodes = &mut self.nodes;
        *self.index.entry(key).or_insert_with(|| {
            nodes.push(Node::new(board));
            nodes.len() - 1
        })
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}

/// Tic-Tac-Toe state space built breadth-first, one ply per level.
///
/// Plies are absolute: a tree rooted at a board with `k` pieces stores that
/// board at ply `k`. Equivalent states within a ply are stored once and
/// shared by every parent reaching them, so the result is a DAG whose edges
/// are indices into the next level.
#[derive(Debug, Clone)]
pub struct GameTree {
    config: TreeConfig,
    first_ply: usize,
    pub(crate) levels: Vec<Level>,
}

impl GameTree {
    /// Tree holding only the empty board
    pub fn new(config: TreeConfig) -> Self {
        Self::from_root(BoardState::new(), config)
    }

    /// Tree holding only `root`, which may be any position
    pub fn from_root(root: BoardState, config: TreeConfig) -> Self {
        let key = dedup_key(&config, &root);
        Self {
            config,
            first_ply: root.occupied_count(),
            levels: vec![Level::with_root(key, root)],
        }
    }

    /// Build the complete structure from the empty board
    pub fn build(config: TreeConfig) -> Result<Self> {
        Self::build_from(BoardState::new(), config)
    }

    /// Build the complete structure below `root`
    pub fn build_from(root: BoardState, config: TreeConfig) -> Result<Self> {
        let mut tree = Self::from_root(root, config);
        tree.expand_all()?;
        info!(
            "built tree ({config}) from {}: {} states over plies {}..={}",
            root.compact(),
            tree.node_count(),
            tree.first_ply(),
            tree.last_ply()
        );
        Ok(tree)
    }

    /// Expand every remaining ply up to the full board
    pub fn expand_all(&mut self) -> Result<()> {
        for ply in self.last_ply()..LAST_PLY {
            self.expand(ply)?;
        }
        Ok(())
    }

    /// Generate the successors of every state at `ply` into `ply + 1`.
    ///
    /// Successors are keyed by canonical key when symmetry filtering is on and
    /// by exact key otherwise. A key already present in the next level is
    /// reused, so each parent's edges point at the first state inserted for
    /// that position. Edges follow ascending move order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LevelOutOfRange`] if `ply` has not been built yet or is
    /// the last ply.
    pub fn expand(&mut self, ply: usize) -> Result<()> {
        let frontier = self.last_ply();
        if ply < self.first_ply || ply > frontier || ply >= LAST_PLY {
            return Err(Error::LevelOutOfRange { ply, frontier });
        }

        let local = ply - self.first_ply;
        if local + 1 == self.levels.len() {
            self.levels.push(Level::default());
        }

        let config = self.config;
        let (built, rest) = self.levels.split_at_mut(local + 1);
        let parents = &mut built[local];
        let next = &mut rest[0];
        let mut expanded = 0usize;

        for parent in parents.nodes.iter_mut() {
            if config.check_winner && parent.board.is_terminal() {
                continue;
            }

            let mut children = Vec::with_capacity(9 - ply);
            for position in parent.board.legal_moves() {
                let successor = parent.board.make_move(position)?;
                let child = next.insert_if_absent(dedup_key(&config, &successor), successor);
                children.push(Edge { position, child });
            }
            parent.children = children;
            expanded += 1;
        }

        debug!(
            "expanded ply {ply}: {expanded}/{} states -> {} states at ply {}",
            parents.len(),
            next.len(),
            ply + 1
        );
        Ok(())
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Ply of the root board
    pub fn first_ply(&self) -> usize {
        self.first_ply
    }

    /// Deepest ply built so far
    pub fn last_ply(&self) -> usize {
        self.first_ply + self.levels.len() - 1
    }

    /// Whether the tree reaches the full board
    pub fn is_complete(&self) -> bool {
        self.last_ply() == LAST_PLY
    }

    pub fn root(&self) -> &Node {
        &self.levels[0].nodes[0]
    }

    pub fn level(&self, ply: usize) -> Option<&Level> {
        ply.checked_sub(self.first_ply)
            .and_then(|local| self.levels.get(local))
    }

    /// Levels paired with their absolute ply
    pub fn levels(&self) -> impl Iterator<Item = (usize, &Level)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(local, level)| (self.first_ply + local, level))
    }

    pub fn node(&self, ply: usize, index: usize) -> Option<&Node> {
        self.level(ply).and_then(|level| level.get(index))
    }

    /// The state an edge leaving a node at `ply` points to
    pub fn child(&self, ply: usize, edge: &Edge) -> Option<&Node> {
        self.node(ply + 1, edge.child)
    }

    /// Number of distinct states at `ply`, zero outside the built range
    pub fn level_len(&self, ply: usize) -> usize {
        self.level(ply).map_or(0, Level::len)
    }

    /// Number of distinct states across all levels
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Level::len).sum()
    }

    /// Per-ply state counts from the root ply to the last built ply
    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Level::len).collect()
    }
}

fn dedup_key(config: &TreeConfig, board: &BoardState) -> BoardKey {
    if config.filter_transforms {
        board.canonical_key()
    } else {
        board.exact_key()
    }
}
