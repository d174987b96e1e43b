//! Tile glyph definitions and their connection rules.
//!
//! Every tile type is a fixed glyph carrying zero, one or two physical
//! strand segments. A segment joins two faces and may be walked in either
//! direction. This table is the only place tile geometry is encoded.

use std::hash::{Hash, Hasher};

use crate::geometry::Face;

/// Number of tile types, including blank.
pub const NUM_TILE_TYPES: usize = 11;

/// Maximum number of strand segments on any single tile.
pub const MAX_RULES: usize = 2;

/// An undirected link between two faces of a tile.
///
/// `from` is only meaningful for the table: it names the face the tracer
/// starts from when the tile is the first one visited. Equality and
/// hashing ignore the order of the two faces.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionRule {
    pub from: Face,
    pub to: Face,
}

impl ConnectionRule {
    pub const fn new(from: Face, to: Face) -> Self {
        Self { from, to }
    }

    /// Returns the face a strand leaves through after entering through `entry`.
    #[inline]
    pub fn exit_for(&self, entry: Face) -> Option<Face> {
        if entry == self.from {
            Some(self.to)
        } else if entry == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    #[inline]
    fn key(&self) -> (u8, u8) {
        let (a, b) = (self.from as u8, self.to as u8);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for ConnectionRule {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ConnectionRule {}

impl Hash for ConnectionRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// How a crossing tile's face labels are rotated into a PD tuple.
///
/// The reference is a directed pass through one of the crossing's
/// segments. If the traversal walked that segment in the reference
/// direction the labels are rotated by `aligned_rotation`, otherwise by
/// `reversed_rotation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingOrientation {
    pub reference: ConnectionRule,
    pub aligned_rotation: usize,
    pub reversed_rotation: usize,
}

impl CrossingOrientation {
    #[inline]
    pub const fn rotation(&self, aligned: bool) -> usize {
        if aligned {
            self.aligned_rotation
        } else {
            self.reversed_rotation
        }
    }
}

/// Classification of a tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Blank,
    /// One segment; satisfied after one pass.
    Elbow,
    /// Two non-crossing segments; satisfied after two passes.
    DoubleCurve,
    /// Two crossing segments; satisfied after two passes.
    Crossing(CrossingOrientation),
}

/// Connection rules of one tile type.
///
/// Uses a fixed-size array so the table can live in a `const`.
#[derive(Debug, Clone, Copy)]
pub struct TileSpec {
    pub kind: TileKind,
    rules: [ConnectionRule; MAX_RULES],
    rule_count: u8,
}

/// Placeholder for unused rule slots.
const NO_RULE: ConnectionRule = ConnectionRule::new(Face::Right, Face::Right);

impl TileSpec {
    const fn blank() -> Self {
        Self {
            kind: TileKind::Blank,
            rules: [NO_RULE; MAX_RULES],
            rule_count: 0,
        }
    }

    const fn elbow(from: Face, to: Face) -> Self {
        Self {
            kind: TileKind::Elbow,
            rules: [ConnectionRule::new(from, to), NO_RULE],
            rule_count: 1,
        }
    }

    const fn double(first: ConnectionRule, second: ConnectionRule) -> Self {
        Self {
            kind: TileKind::DoubleCurve,
            rules: [first, second],
            rule_count: 2,
        }
    }

    const fn crossing(orientation: CrossingOrientation) -> Self {
        Self {
            kind: TileKind::Crossing(orientation),
            rules: [
                ConnectionRule::new(Face::Right, Face::Left),
                ConnectionRule::new(Face::Top, Face::Bottom),
            ],
            rule_count: 2,
        }
    }

    /// Returns the valid rules for this tile.
    #[inline]
    pub fn rules(&self) -> &[ConnectionRule] {
        &self.rules[..self.rule_count as usize]
    }

    /// Number of passes after which the tile counts as satisfied.
    #[inline]
    pub fn passes_required(&self) -> usize {
        self.rule_count as usize
    }

    /// Finds the rule a strand follows when entering through `entry`.
    ///
    /// Returns the rule's slot and the face the strand leaves through.
    #[inline]
    pub fn rule_entered_by(&self, entry: Face) -> Option<(usize, Face)> {
        self.rules()
            .iter()
            .enumerate()
            .find_map(|(index, rule)| rule.exit_for(entry).map(|exit| (index, exit)))
    }

    /// Face the tracer starts from when this is the first tile visited.
    #[inline]
    pub fn start_face(&self) -> Option<Face> {
        self.rules().first().map(|rule| rule.from)
    }
}

/// Connection rules for every tile type, indexed by tile code.
pub static TILE_SPECS: [TileSpec; NUM_TILE_TYPES] = [
    // 0: blank
    TileSpec::blank(),
    // 1: left-bottom elbow
    TileSpec::elbow(Face::Left, Face::Bottom),
    // 2: right-bottom elbow
    TileSpec::elbow(Face::Right, Face::Bottom),
    // 3: right-top elbow
    TileSpec::elbow(Face::Right, Face::Top),
    // 4: left-top elbow
    TileSpec::elbow(Face::Left, Face::Top),
    // 5: horizontal straight
    TileSpec::elbow(Face::Left, Face::Right),
    // 6: vertical straight
    TileSpec::elbow(Face::Top, Face::Bottom),
    // 7: left-bottom and top-right arcs
    TileSpec::double(
        ConnectionRule::new(Face::Left, Face::Bottom),
        ConnectionRule::new(Face::Top, Face::Right),
    ),
    // 8: right-bottom and left-top arcs
    TileSpec::double(
        ConnectionRule::new(Face::Right, Face::Bottom),
        ConnectionRule::new(Face::Left, Face::Top),
    ),
    // 9: crossing, oriented by the horizontal strand
    TileSpec::crossing(CrossingOrientation {
        reference: ConnectionRule::new(Face::Right, Face::Left),
        aligned_rotation: 0,
        reversed_rotation: 2,
    }),
    // 10: crossing, oriented by the vertical strand
    TileSpec::crossing(CrossingOrientation {
        reference: ConnectionRule::new(Face::Top, Face::Bottom),
        aligned_rotation: 1,
        reversed_rotation: 3,
    }),
];

/// A tile type code in `0..NUM_TILE_TYPES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileType(u8);

impl TileType {
    /// Creates a tile type, rejecting out-of-range codes.
    pub const fn new(code: u8) -> Option<Self> {
        if (code as usize) < NUM_TILE_TYPES {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Parses a single hexadecimal tile symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        symbol
            .to_digit(16)
            .and_then(|digit| Self::new(digit as u8))
    }

    /// Lower-case hexadecimal symbol for this tile.
    pub fn symbol(self) -> char {
        // codes are < 16, so this cannot fail
        char::from_digit(self.0 as u32, 16).unwrap_or('?')
    }

    #[inline(always)]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn spec(self) -> &'static TileSpec {
        &TILE_SPECS[self.0 as usize]
    }

    #[inline]
    pub fn kind(self) -> TileKind {
        self.spec().kind
    }

    #[inline]
    pub fn is_blank(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_crossing(self) -> bool {
        matches!(self.kind(), TileKind::Crossing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_types() -> impl Iterator<Item = TileType> {
        (0..NUM_TILE_TYPES as u8).filter_map(TileType::new)
    }

    #[test]
    fn test_rules_are_unordered() {
        let forward = ConnectionRule::new(Face::Left, Face::Bottom);
        let backward = ConnectionRule::new(Face::Bottom, Face::Left);
        assert_eq!(forward, backward);
        assert_ne!(forward, ConnectionRule::new(Face::Left, Face::Top));
        assert_eq!(forward.exit_for(Face::Bottom), Some(Face::Left));
        assert_eq!(forward.exit_for(Face::Right), None);
    }

    #[test]
    fn test_rules_use_each_face_at_most_once() {
        for tile in all_types() {
            let mut seen = [false; 4];
            for rule in tile.spec().rules() {
                assert_ne!(rule.from, rule.to, "tile {tile:?} has a degenerate rule");
                for face in [rule.from, rule.to] {
                    assert!(!seen[face.index()], "tile {tile:?} reuses face {face}");
                    seen[face.index()] = true;
                }
            }
        }
    }

    #[test]
    fn test_satisfaction_policy_matches_kind() {
        for tile in all_types() {
            let expected = match tile.kind() {
                TileKind::Blank => 0,
                TileKind::Elbow => 1,
                TileKind::DoubleCurve | TileKind::Crossing(_) => 2,
            };
            assert_eq!(tile.spec().passes_required(), expected, "tile {tile:?}");
        }
    }

    #[test]
    fn test_crossing_reference_is_one_of_its_rules() {
        for tile in all_types().filter(|tile| tile.is_crossing()) {
            let TileKind::Crossing(orientation) = tile.kind() else {
                unreachable!()
            };
            assert!(tile.spec().rules().contains(&orientation.reference));
            assert_ne!(orientation.aligned_rotation, orientation.reversed_rotation);
        }
    }

    #[test]
    fn test_symbols() {
        for tile in all_types() {
            assert_eq!(TileType::from_symbol(tile.symbol()), Some(tile));
        }
        assert_eq!(TileType::from_symbol('A'), TileType::new(10));
        assert_eq!(TileType::from_symbol('b'), None);
        assert_eq!(TileType::from_symbol('x'), None);
        assert_eq!(TileType::new(11), None);
    }

    #[test]
    fn test_start_faces() {
        let start = |code| TileType::new(code).and_then(|t| t.spec().start_face());
        assert_eq!(start(0), None);
        assert_eq!(start(1), Some(Face::Left));
        assert_eq!(start(2), Some(Face::Right));
        assert_eq!(start(4), Some(Face::Left));
        assert_eq!(start(5), Some(Face::Left));
        assert_eq!(start(6), Some(Face::Top));
        assert_eq!(start(9), Some(Face::Right));
    }
}
