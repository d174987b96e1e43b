//! Mosaic grid representation, decoding and text rendering.
//!
//! A mosaic is a square board of `side * side` tiles stored as a flat
//! row-major array. Encoded mosaics are one hexadecimal symbol per tile.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;
use crate::geometry::Face;
use crate::tiles::TileType;

/// Converts (row, column) coordinates to a linear tile index.
#[inline(always)]
pub const fn coord_to_idx(row: usize, column: usize, side: usize) -> usize {
    row * side + column
}

/// Converts a linear tile index to (row, column) coordinates.
#[inline(always)]
pub const fn idx_to_coord(index: usize, side: usize) -> (usize, usize) {
    (index / side, index % side)
}

/// Largest `s` with `s * s <= n`.
fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    // correct float rounding in either direction
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// A decoded square mosaic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mosaic {
    side: usize,
    tiles: Vec<TileType>,
}

impl Mosaic {
    /// Decodes one mosaic line.
    ///
    /// Surrounding whitespace is ignored. The remaining symbols must all be
    /// tile codes and their count must be a perfect square.
    pub fn decode(line: &str) -> Result<Self, FormatError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(FormatError::Empty);
        }

        let tiles = line
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                TileType::from_symbol(symbol)
                    .ok_or(FormatError::UnmappedSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let side = integer_sqrt(tiles.len());
        if side * side != tiles.len() {
            return Err(FormatError::NotSquare {
                length: tiles.len(),
            });
        }

        Ok(Self { side, tiles })
    }

    /// Decodes a line that must have exactly `side * side` tiles.
    pub fn decode_with_side(line: &str, side: usize) -> Result<Self, FormatError> {
        let mosaic = Self::decode(line)?;
        if mosaic.side != side {
            return Err(FormatError::LengthMismatch {
                length: mosaic.len(),
                expected: side * side,
            });
        }
        Ok(mosaic)
    }

    /// Side length of the board.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    #[inline(always)]
    pub fn tile(&self, index: usize) -> TileType {
        self.tiles[index]
    }

    /// First non-blank tile in raster order, with the face the strand
    /// starts from.
    ///
    /// Returns `None` for an all-blank mosaic.
    pub fn start(&self) -> Option<(usize, Face)> {
        self.tiles
            .iter()
            .enumerate()
            .find_map(|(index, tile)| tile.spec().start_face().map(|face| (index, face)))
    }

    /// Re-encodes the mosaic as a line of lower-case symbols.
    pub fn encode(&self) -> String {
        self.tiles.iter().map(|tile| tile.symbol()).collect()
    }
}

impl FromStr for Mosaic {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Mosaic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Display glyph for a tile.
fn glyph(tile: TileType) -> char {
    match tile.code() {
        0 => '·',
        1 => '┐',
        2 => '┌',
        3 => '└',
        4 => '┘',
        5 => '─',
        6 => '│',
        7 => '╱',
        8 => '╲',
        9 => '┿',
        _ => '╂',
    }
}

/// Formats a mosaic as a human-readable picture.
///
/// One glyph per tile, rows from top to bottom. Blank tiles show as '·'.
pub fn format_mosaic(mosaic: &Mosaic) -> String {
    let mut output = String::with_capacity(mosaic.len() * 4);
    for row in mosaic.tiles.chunks(mosaic.side.max(1)) {
        output.extend(row.iter().map(|&tile| glyph(tile)));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for side in 1..6 {
            for idx in 0..side * side {
                let (row, column) = idx_to_coord(idx, side);
                assert!(row < side && column < side);
                assert_eq!(coord_to_idx(row, column, side), idx);
            }
        }
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(15), 3);
        assert_eq!(integer_sqrt(16), 4);
        assert_eq!(integer_sqrt(17), 4);
        assert_eq!(integer_sqrt(10_000), 100);
    }

    #[test]
    fn test_decode() {
        let mosaic = Mosaic::decode(" 2134\n").unwrap();
        assert_eq!(mosaic.side(), 2);
        assert_eq!(mosaic.len(), 4);
        assert_eq!(mosaic.tile(3), TileType::new(4).unwrap());
        assert_eq!(mosaic.encode(), "2134");
        assert_eq!("0a9000000".parse::<Mosaic>().unwrap().encode(), "0a9000000");
    }

    #[test]
    fn test_decode_uppercase_symbols() {
        let mosaic = Mosaic::decode("000A").unwrap();
        assert!(mosaic.tile(3).is_crossing());
        assert_eq!(mosaic.to_string(), "000a");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(Mosaic::decode("   "), Err(FormatError::Empty));
        assert_eq!(
            Mosaic::decode("21b4"),
            Err(FormatError::UnmappedSymbol {
                symbol: 'b',
                position: 2
            })
        );
        assert_eq!(
            Mosaic::decode("21340"),
            Err(FormatError::NotSquare { length: 5 })
        );
        assert_eq!(
            Mosaic::decode_with_side("2134", 3),
            Err(FormatError::LengthMismatch {
                length: 4,
                expected: 9
            })
        );
    }

    #[test]
    fn test_start_is_first_non_blank_tile() {
        let mosaic = Mosaic::decode("000210340").unwrap();
        assert_eq!(mosaic.start(), Some((3, Face::Right)));
        assert_eq!(Mosaic::decode("0000").unwrap().start(), None);
    }

    #[test]
    fn test_format_trefoil() {
        let mosaic = Mosaic::decode("0210299163943540").unwrap();
        insta::assert_snapshot!(format_mosaic(&mosaic), @r"
        ·┌┐·
        ┌┿┿┐
        │└┿┘
        └─┘·
        ");
    }
}
