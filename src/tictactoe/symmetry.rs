//! D4 symmetry group of the 3x3 board

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Cell};

/// Clockwise rotation in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }

    pub fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::None,
            1 => Rotation::Quarter,
            2 => Rotation::Half,
            _ => Rotation::ThreeQuarter,
        }
    }

    pub fn degrees(self) -> u16 {
        u16::from(self.quarter_turns()) * 90
    }
}

/// An element of D4: an optional left-right mirror followed by a clockwise
/// rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    pub rotation: Rotation,
    pub reflection: bool,
}

impl D4Transform {
    pub const IDENTITY: D4Transform = D4Transform::new(Rotation::None, false);

    /// Identity, the three rotations, the flip, then the flip composed with
    /// each rotation
    pub const ALL: [D4Transform; 8] = [
        D4Transform::new(Rotation::None, false),
        D4Transform::new(Rotation::Quarter, false),
        D4Transform::new(Rotation::Half, false),
        D4Transform::new(Rotation::ThreeQuarter, false),
        D4Transform::new(Rotation::None, true),
        D4Transform::new(Rotation::Quarter, true),
        D4Transform::new(Rotation::Half, true),
        D4Transform::new(Rotation::ThreeQuarter, true),
    ];

    pub const fn new(rotation: Rotation, reflection: bool) -> Self {
        D4Transform {
            rotation,
            reflection,
        }
    }

    /// Where the cell at `pos` lands under this transform
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        if self.reflection {
            col = 2 - col;
        }

        for _ in 0..self.rotation.quarter_turns() {
            (row, col) = (col, 2 - row);
        }

        row * 3 + col
    }

    /// Apply the transform to a cell sequence, returning a new sequence
    pub fn apply(&self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }

    /// Reflections are involutions; rotations invert to the opposite turn.
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            *self
        } else {
            D4Transform::new(
                Rotation::from_quarter_turns(4 - self.rotation.quarter_turns()),
                false,
            )
        }
    }

    /// The transform equivalent to applying `self` and then `next`.
    ///
    /// A mirror reverses the sense of any rotation applied before it, so the
    /// earlier rotation subtracts when `next` reflects.
    pub fn then(&self, next: D4Transform) -> D4Transform {
        let a = self.rotation.quarter_turns();
        let b = next.rotation.quarter_turns();
        let turns = if next.reflection { b + 4 - a } else { a + b };
        D4Transform::new(
            Rotation::from_quarter_turns(turns),
            self.reflection ^ next.reflection,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl fmt::Display for D4Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reflection, self.rotation) {
            (false, Rotation::None) => write!(f, "identity"),
            (false, rotation) => write!(f, "rotate {}° cw", rotation.degrees()),
            (true, Rotation::None) => write!(f, "flip"),
            (true, rotation) => write!(f, "flip + rotate {}° cw", rotation.degrees()),
        }
    }
}

/// Rotate the board 90 degrees clockwise
pub fn rotate_cw(cells: &[Cell; 9]) -> [Cell; 9] {
    D4Transform::new(Rotation::Quarter, false).apply(cells)
}

/// Rotate the board 180 degrees (reverses the cell order)
pub fn rotate_180(cells: &[Cell; 9]) -> [Cell; 9] {
    D4Transform::new(Rotation::Half, false).apply(cells)
}

/// Rotate the board 90 degrees counterclockwise
pub fn rotate_ccw(cells: &[Cell; 9]) -> [Cell; 9] {
    D4Transform::new(Rotation::ThreeQuarter, false).apply(cells)
}

/// Mirror the board left to right
pub fn flip_horizontal(cells: &[Cell; 9]) -> [Cell; 9] {
    D4Transform::new(Rotation::None, true).apply(cells)
}

impl BoardState {
    /// Apply a D4 transform to the board. The player to move is unchanged.
    pub fn transform(&self, t: &D4Transform) -> Self {
        BoardState {
            cells: t.apply(&self.cells),
            to_move: self.to_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [Cell; 9] {
        // XO-
        // -X-
        // O--
        BoardState::from_string("XO- -X- O--").unwrap().cells
    }

    #[test]
    fn rotate_cw_matches_row_major_layout() {
        // the new top row is the old left column read bottom to top
        let rotated = rotate_cw(&sample());
        let cells = sample();
        assert_eq!(&rotated[0..3], &[cells[6], cells[3], cells[0]]);
        assert_eq!(&rotated[3..6], &[cells[7], cells[4], cells[1]]);
        assert_eq!(&rotated[6..9], &[cells[8], cells[5], cells[2]]);
    }

    #[test]
    fn rotate_180_reverses_cells() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(rotate_180(&sample()), reversed);
    }

    #[test]
    fn flip_reverses_each_row() {
        let flipped = flip_horizontal(&sample());
        let cells = sample();
        for row in 0..3 {
            assert_eq!(flipped[row * 3], cells[row * 3 + 2]);
            assert_eq!(flipped[row * 3 + 1], cells[row * 3 + 1]);
            assert_eq!(flipped[row * 3 + 2], cells[row * 3]);
        }
    }

    #[test]
    fn rotations_cycle_and_flip_is_involution() {
        let cells = sample();
        let four = rotate_cw(&rotate_cw(&rotate_cw(&rotate_cw(&cells))));
        assert_eq!(four, cells);
        assert_eq!(flip_horizontal(&flip_horizontal(&cells)), cells);
        assert_eq!(rotate_ccw(&rotate_cw(&cells)), cells);
        assert_eq!(rotate_cw(&rotate_cw(&cells)), rotate_180(&cells));
    }

    #[test]
    fn inverse_undoes_every_transform() {
        let cells = sample();
        for t in D4Transform::ALL {
            assert_eq!(t.inverse().apply(&t.apply(&cells)), cells, "{t}");
            assert!(t.then(t.inverse()).is_identity(), "{t}");
        }
    }

    #[test]
    fn composition_agrees_with_sequential_application() {
        let cells = sample();
        for first in D4Transform::ALL {
            for second in D4Transform::ALL {
                let composed = first.then(second);
                assert_eq!(
                    composed.apply(&cells),
                    second.apply(&first.apply(&cells)),
                    "{first} then {second}"
                );
            }
        }
    }

    #[test]
    fn group_elements_are_distinct() {
        // the sample board has a trivial stabilizer, so all 8 images differ
        let cells = sample();
        let images: Vec<[Cell; 9]> = D4Transform::ALL.iter().map(|t| t.apply(&cells)).collect();
        for (i, a) in images.iter().enumerate() {
            for b in images.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
