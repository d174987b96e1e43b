//! Strand traversal over a decoded mosaic.
//!
//! The tracer starts at the first non-blank tile and follows the strand
//! tile by tile, recording every segment it walks. Walking into a segment
//! that was already walked means the strand has come back to where it
//! started, and the trace closes. The mosaic is a knot exactly when every
//! tile has received its full complement of passes by then.
//!
//! Key points:
//! - All per-mosaic state lives in a `TraceSession` owned by one call
//! - Segments are compared undirected; the walk direction is kept next to
//!   them for crossing orientation
//! - Crossing tiles get one strand label per face and are queued for code
//!   emission at the pass that satisfies them
//! - Each non-closing step records a fresh segment, so a trace takes at
//!   most `2 * side^2 + 1` steps

use crate::error::FormatError;
use crate::geometry::{step, Face};
use crate::grid::Mosaic;
use crate::tiles::{CrossingOrientation, TileKind, TileType, MAX_RULES};

/// Entry face used for each segment of a tile, `None` if not walked yet.
type UsedSegments = [Option<Face>; MAX_RULES];

/// Strand labels of a crossing tile, indexed by face.
pub type FaceLabels = [u32; 4];

/// Traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    /// Strand in progress; about to enter `tile` through `face`.
    Tracing { tile: usize, face: Face },
    /// The strand returned to a segment it already walked.
    Closed,
}

/// A satisfied crossing tile, ready for code emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingRecord {
    pub tile_index: usize,
    pub tile: TileType,
    pub labels: FaceLabels,
    pub orientation: CrossingOrientation,
    /// Whether the orientation's reference segment was walked in its
    /// reference direction.
    pub aligned: bool,
}

impl CrossingRecord {
    /// Rotation to apply to `labels` when building the PD tuple.
    #[inline]
    pub fn rotation(&self) -> usize {
        self.orientation.rotation(self.aligned)
    }
}

/// Result of a closed trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceReport {
    /// Per-tile satisfaction at closure.
    pub satisfied: Vec<bool>,
    /// Crossing tiles in the order they became satisfied.
    pub crossings: Vec<CrossingRecord>,
    /// Strand counter at closure: the label of the closing segment.
    pub final_strand: u32,
    /// Number of segments walked.
    pub steps: usize,
}

impl TraceReport {
    /// True if the strand exists and visited every tile it had to.
    pub fn is_knot(&self) -> bool {
        self.steps > 0 && self.satisfied.iter().all(|&satisfied| satisfied)
    }

    /// Indices of tiles left unsatisfied.
    pub fn unsatisfied(&self) -> Vec<usize> {
        self.satisfied
            .iter()
            .enumerate()
            .filter(|&(_, &satisfied)| !satisfied)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Mutable state exclusively owned by one traversal.
struct TraceSession<'a> {
    mosaic: &'a Mosaic,
    used: Vec<UsedSegments>,
    satisfied: Vec<bool>,
    labels: Vec<FaceLabels>,
    /// Crossing tile indices in first-satisfied order.
    pending_crossings: Vec<usize>,
    strand: u32,
    steps: usize,
}

impl<'a> TraceSession<'a> {
    fn new(mosaic: &'a Mosaic) -> Self {
        Self {
            mosaic,
            used: vec![[None; MAX_RULES]; mosaic.len()],
            satisfied: mosaic.tiles().iter().map(|tile| tile.is_blank()).collect(),
            labels: vec![[0; 4]; mosaic.len()],
            pending_crossings: Vec::new(),
            strand: 1,
            steps: 0,
        }
    }

    /// Walks one segment and moves to the next tile.
    fn advance(&mut self, tile: usize, face: Face) -> Result<TraceState, FormatError> {
        let tile_type = self.mosaic.tile(tile);
        let spec = tile_type.spec();

        let Some((rule_index, exit)) = spec.rule_entered_by(face) else {
            return Err(FormatError::DanglingStrand { tile, face });
        };

        let segments = &mut self.used[tile];
        if segments[rule_index].is_some() {
            return Ok(TraceState::Closed);
        }
        segments[rule_index] = Some(face);
        self.steps += 1;

        let passes = segments.iter().flatten().count();
        if passes >= spec.passes_required() {
            self.satisfied[tile] = true;
        }

        let next_face = match spec.kind {
            TileKind::Crossing(_) => {
                if self.satisfied[tile] {
                    self.pending_crossings.push(tile);
                }
                // the strand runs straight through and keeps its entry face
                let labels = &mut self.labels[tile];
                labels[face.index()] = self.strand;
                self.strand += 1;
                labels[face.opposite().index()] = self.strand;
                face
            }
            _ => exit.opposite(),
        };

        match step(tile, next_face, self.mosaic.side()) {
            Some(next) => Ok(TraceState::Tracing {
                tile: next,
                face: next_face,
            }),
            None => Err(FormatError::OffGrid { tile, face: exit }),
        }
    }

    fn crossing_record(&self, tile_index: usize) -> Option<CrossingRecord> {
        let tile = self.mosaic.tile(tile_index);
        let TileKind::Crossing(orientation) = tile.kind() else {
            return None;
        };
        let labels = self.labels[tile_index];
        assert!(
            labels.iter().all(|&label| label != 0),
            "crossing tile {tile_index} satisfied without four strand labels: {labels:?}"
        );

        let reference = orientation.reference;
        let aligned = tile
            .spec()
            .rules()
            .iter()
            .zip(&self.used[tile_index])
            .any(|(rule, entry)| *rule == reference && *entry == Some(reference.from));

        Some(CrossingRecord {
            tile_index,
            tile,
            labels,
            orientation,
            aligned,
        })
    }

    fn finish(self) -> TraceReport {
        let crossings = self
            .pending_crossings
            .iter()
            .filter_map(|&tile_index| self.crossing_record(tile_index))
            .collect();

        TraceReport {
            crossings,
            final_strand: self.strand,
            steps: self.steps,
            satisfied: self.satisfied,
        }
    }
}

/// Traces the strand of a mosaic until it closes.
///
/// An all-blank mosaic closes immediately with no steps and is not a knot.
/// Fails if the strand runs into a face with no connection or off the top
/// or bottom of the board.
pub fn trace(mosaic: &Mosaic) -> Result<TraceReport, FormatError> {
    let mut session = TraceSession::new(mosaic);

    let mut state = match mosaic.start() {
        Some((tile, face)) => TraceState::Tracing { tile, face },
        None => TraceState::Closed,
    };

    while let TraceState::Tracing { tile, face } = state {
        state = session.advance(tile, face)?;
    }

    Ok(session.finish())
}
