//! Winning line detection

use super::{Cell, Player};

/// The 8 winning lines: rows, columns, then diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player holds all three cells of some line
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Empty positions that would complete a line for `player`, ascending
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::completing_cell(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    fn completing_cell(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut owned = 0;
        let mut empty = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty if empty.is_none() => empty = Some(idx),
                Cell::Empty => return None,
                c if c == target => owned += 1,
                _ => return None,
            }
        }

        if owned == 2 { empty } else { None }
    }
}
