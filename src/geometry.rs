//! Face arithmetic and neighbour stepping on a cylindrical board.
//!
//! Faces are numbered anticlockwise from the right edge of a tile:
//!
//! ```text
//!       1
//!    2 [ ] 0
//!       3
//! ```
//!
//! Rows grow downwards. The board wraps horizontally (the last column is
//! adjacent to column 0) but not vertically.

use std::fmt;

use crate::grid::{coord_to_idx, idx_to_coord};

/// One of the four sides of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    Right = 0,
    Top = 1,
    Left = 2,
    Bottom = 3,
}

impl Face {
    /// All faces in numbering order.
    pub const ALL: [Face; 4] = [Face::Right, Face::Top, Face::Left, Face::Bottom];

    /// Slot of this face in a per-face array.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face for a slot index, taken modulo 4.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Face {
        match index & 3 {
            0 => Face::Right,
            1 => Face::Top,
            2 => Face::Left,
            _ => Face::Bottom,
        }
    }

    /// The face directly across the tile.
    #[inline(always)]
    pub const fn opposite(self) -> Face {
        Face::from_index(self.index() ^ 2)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::Right => "right",
            Face::Top => "top",
            Face::Left => "left",
            Face::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Returns the tile a strand enters through `entry` after leaving `tile`.
///
/// The strand crosses into the neighbour on the side opposite `entry`:
/// entering through the right face means the strand moved one column
/// left. Horizontal moves wrap around the cylinder; vertical moves past
/// the top or bottom row return `None`.
#[inline]
pub fn step(tile: usize, entry: Face, side: usize) -> Option<usize> {
    let (row, column) = idx_to_coord(tile, side);
    match entry {
        Face::Right => Some(coord_to_idx(row, (column + side - 1) % side, side)),
        Face::Left => Some(coord_to_idx(row, (column + 1) % side, side)),
        Face::Top => (row + 1 < side).then(|| coord_to_idx(row + 1, column, side)),
        Face::Bottom => row.checked_sub(1).map(|above| coord_to_idx(above, column, side)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_an_involution() {
        for face in Face::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().opposite(), face);
        }
        assert_eq!(Face::Right.opposite(), Face::Left);
        assert_eq!(Face::Top.opposite(), Face::Bottom);
    }

    #[test]
    fn test_from_index_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_index(face.index()), face);
        }
        assert_eq!(Face::from_index(6), Face::Left);
    }

    #[test]
    fn test_horizontal_steps_wrap_within_row() {
        // 3x3 board; tile 5 is row 1, column 2
        assert_eq!(step(5, Face::Left, 3), Some(3), "right edge wraps to column 0");
        assert_eq!(step(3, Face::Right, 3), Some(5), "left edge wraps to last column");
        assert_eq!(step(4, Face::Left, 3), Some(5));
        assert_eq!(step(4, Face::Right, 3), Some(3));
    }

    #[test]
    fn test_vertical_steps_do_not_wrap() {
        assert_eq!(step(1, Face::Top, 3), Some(4));
        assert_eq!(step(4, Face::Bottom, 3), Some(1));
        assert_eq!(step(1, Face::Bottom, 3), None, "top row cannot move up");
        assert_eq!(step(7, Face::Top, 3), None, "bottom row cannot move down");
    }

    #[test]
    fn test_single_tile_board_wraps_onto_itself() {
        assert_eq!(step(0, Face::Left, 1), Some(0));
        assert_eq!(step(0, Face::Right, 1), Some(0));
        assert_eq!(step(0, Face::Top, 1), None);
    }
}
