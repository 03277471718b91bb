//! Board state representation, move generation and dedup keys

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lines::LineAnalyzer, symmetry::D4Transform};
use crate::error::{Error, Result};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Rendering symbol: `-` for empty, `X` and `O` for the players
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Digit used in [`BoardKey`] encodings
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }
}

/// A player in the game. X always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Deterministic serialization of a cell sequence, one digit per cell.
///
/// Keys order lexicographically by cell, which is the total order used to pick
/// the canonical representative of a symmetry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardKey([u8; 9]);

impl BoardKey {
    pub fn from_cells(cells: &[Cell; 9]) -> Self {
        BoardKey(cells.map(Cell::code))
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// One game position: the cells plus whose turn it is.
///
/// Boards are plain values. Every move produces a new, fully independent
/// board; nothing is ever shared between a parent and its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

/// The canonical representative of a board's symmetry class
#[derive(Debug, Clone)]
pub struct CanonicalContext {
    /// The canonical board state
    pub state: BoardState,
    /// The transform mapping the original board onto `state`
    pub transform: D4Transform,
    /// Key of the canonical board
    pub key: BoardKey,
}

impl CanonicalContext {
    /// Map a move from original coordinates to canonical coordinates
    pub fn map_move_to_canonical(&self, original_move: usize) -> usize {
        self.transform.transform_position(original_move)
    }

    /// Map a move from canonical coordinates back to original coordinates
    pub fn map_canonical_to_original(&self, canonical_move: usize) -> usize {
        self.transform.inverse().transform_position(canonical_move)
    }
}

impl BoardState {
    /// Create the empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
            to_move: Player::X,
        }
    }

    /// Create a board from its cells, inferring the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPieceCounts`] unless X has as many pieces as O
    /// or exactly one more.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self> {
        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        let to_move = if x_count == o_count {
            Player::X
        } else if x_count == o_count + 1 {
            Player::O
        } else {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        };
        Ok(BoardState { cells, to_move })
    }

    /// Parse a board such as `"XX- OO- ---"`.
    ///
    /// Whitespace and `/` separators are ignored. Empty cells may be written as
    /// `-`, `.` or `_`. The player to move is inferred from the piece counts.
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Self::from_cells(cells)
    }

    /// Number of occupied cells, which is also the board's ply
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Get cell at position (0-8)
    ///
    /// # Panics
    ///
    /// Panics if `pos >= 9`. Use [`BoardState::make_move`] for checked input.
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    ///
    /// # Panics
    ///
    /// Panics if `pos >= 9`.
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Empty positions in ascending order.
    ///
    /// The iterator owns a copy of the cells, so it can be recreated freely and
    /// never borrows the board.
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + Clone + use<> {
        let cells = self.cells;
        (0..9).filter(move |&pos| cells[pos] == Cell::Empty)
    }

    /// Play the current player at `pos` and return the successor board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the cell is occupied and
    /// [`Error::InvalidPosition`] if `pos` is not on the board.
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState> {
        if pos >= 9 {
            return Err(Error::InvalidPosition { position: pos });
        }

        if !self.is_empty(pos) {
            return Err(Error::IllegalMove {
                position: pos,
                board: self.compact(),
            });
        }

        let mut next = *self;
        next.cells[pos] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one. X is checked first.
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.legal_moves().next().is_none()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.winner().is_none()
    }

    /// Key of this exact cell sequence
    pub fn exact_key(&self) -> BoardKey {
        BoardKey::from_cells(&self.cells)
    }

    /// Key shared by every board in this board's symmetry class: the
    /// lexicographic maximum over the 8 D4 images.
    pub fn canonical_key(&self) -> BoardKey {
        D4Transform::ALL
            .iter()
            .map(|t| BoardKey::from_cells(&t.apply(&self.cells)))
            .fold(self.exact_key(), std::cmp::max)
    }

    /// Find the canonical image together with the transform producing it.
    ///
    /// Ties between transforms with the same image resolve to the earliest
    /// transform in [`D4Transform::ALL`].
    pub fn canonical_context(&self) -> CanonicalContext {
        let mut best = CanonicalContext {
            state: *self,
            transform: D4Transform::IDENTITY,
            key: self.exact_key(),
        };

        for transform in D4Transform::ALL {
            let state = self.transform(&transform);
            let key = state.exact_key();
            if key > best.key {
                best = CanonicalContext {
                    state,
                    transform,
                    key,
                };
            }
        }

        best
    }

    /// Single-line rendering, e.g. `XX-/OO-/---`
    pub fn compact(&self) -> String {
        let mut out = String::with_capacity(11);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                out.push('/');
            }
            out.push(cell.to_char());
        }
        out
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the 3x3 grid, one row per line, cells separated by spaces.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} {} {}",
                chunk[0].to_char(),
                chunk[1].to_char(),
                chunk[2].to_char()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = BoardState::new();
        assert_eq!(board.to_move, Player::X);
        assert!(board.cells.iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_make_move() {
        let board = BoardState::new();

        let next = board.make_move(4).unwrap();
        assert_eq!(next.cells[4], Cell::X);
        assert_eq!(next.to_move, Player::O);
        // the parent is untouched
        assert_eq!(board.cells[4], Cell::Empty);

        let err = next.make_move(4).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { position: 4, .. }));
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_make_move_out_of_bounds() {
        let err = BoardState::new().make_move(9).unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { position: 9 }));
    }

    #[test]
    fn test_legal_moves_ascending_and_restartable() {
        let board = BoardState::from_string("X-O -X- ---").unwrap();
        let moves = board.legal_moves();
        let first: Vec<usize> = moves.clone().collect();
        let second: Vec<usize> = moves.collect();
        assert_eq!(first, vec![1, 3, 5, 6, 7, 8]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_player_alternation() {
        let mut board = BoardState::new();
        for (pos, expected) in [(0, Player::O), (1, Player::X), (2, Player::O)] {
            board = board.make_move(pos).unwrap();
            assert_eq!(board.to_move, expected);
        }
    }

    #[test]
    fn test_win_detection() {
        let row = BoardState::from_string("XXX OO- ---").unwrap();
        assert_eq!(row.winner(), Some(Player::X));
        assert!(row.is_terminal());

        let column = BoardState::from_string("XOX -OX -O-").unwrap();
        assert_eq!(column.winner(), Some(Player::O));

        let diagonal = BoardState::from_string("XO- OX- --X").unwrap();
        assert_eq!(diagonal.winner(), Some(Player::X));
    }

    #[test]
    fn test_draw_detection() {
        let board = BoardState::from_string("XOX XOO OXX").unwrap();
        assert!(board.is_terminal());
        assert!(board.is_draw());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_open_board_not_terminal() {
        let board = BoardState::from_string("XX- OO- ---").unwrap();
        assert!(!board.is_terminal());
        assert_eq!(board.to_move, Player::X);
    }

    #[test]
    fn test_canonical_key_corners_collapse() {
        let corners: Vec<BoardKey> = [0, 2, 6, 8]
            .iter()
            .map(|&pos| BoardState::new().make_move(pos).unwrap().canonical_key())
            .collect();
        assert!(corners.windows(2).all(|w| w[0] == w[1]));

        let edge = BoardState::new().make_move(1).unwrap().canonical_key();
        let center = BoardState::new().make_move(4).unwrap().canonical_key();
        assert_ne!(corners[0], edge);
        assert_ne!(edge, center);
    }

    #[test]
    fn test_canonical_key_is_maximum() {
        // X in a corner: the maximal image puts it at index 0
        let board = BoardState::new().make_move(8).unwrap();
        assert_eq!(board.canonical_key().to_string(), "100000000");
        assert_eq!(board.exact_key().to_string(), "000000001");
    }

    #[test]
    fn test_canonical_context_matches_key() {
        let board = BoardState::from_string("--- -O- X--").unwrap();
        let ctx = board.canonical_context();
        assert_eq!(ctx.key, board.canonical_key());
        assert_eq!(ctx.state.exact_key(), ctx.key);
        for pos in 0..9 {
            let mapped = ctx.map_move_to_canonical(pos);
            assert_eq!(ctx.map_canonical_to_original(mapped), pos);
            assert_eq!(ctx.state.cells[mapped], board.cells[pos]);
        }
    }

    #[test]
    fn test_from_string() {
        let board = BoardState::from_string("XOX......").unwrap();
        assert_eq!(board.cells[0], Cell::X);
        assert_eq!(board.cells[1], Cell::O);
        assert_eq!(board.to_move, Player::O);

        assert!(matches!(
            BoardState::from_string("XO"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            BoardState::from_string("XOZ......"),
            Err(Error::InvalidCellCharacter { character: 'Z', .. })
        ));
        assert!(matches!(
            BoardState::from_string("XXX......"),
            Err(Error::InvalidPieceCounts { x_count: 3, o_count: 0 })
        ));
    }

    #[test]
    fn test_digit_zero_is_not_a_piece() {
        assert!(matches!(
            BoardState::from_string("X0-------"),
            Err(Error::InvalidCellCharacter {
                character: '0',
                position: 1,
                ..
            })
        ));
        assert_eq!(Cell::from_char('0'), None);
    }

    #[test]
    #[should_panic]
    fn test_cell_access_out_of_bounds_panics() {
        let _ = BoardState::new().get(9);
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_string("XX- OO- ---").unwrap();
        assert_eq!(board.to_string(), "X X -\nO O -\n- - -");
        assert_eq!(board.compact(), "XX-/OO-/---");
    }
}
