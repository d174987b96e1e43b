//! Planar-diagram (PD) crossing codes built from a closed trace.

use std::fmt;

use crate::tracer::CrossingRecord;

/// Strand labels around one crossing.
pub type PdTuple = [u32; 4];

/// Diagrams with fewer crossings than this are unknots by construction.
pub const MIN_NONTRIVIAL_CROSSINGS: usize = 3;

/// An ordered list of crossing tuples, one per crossing.
///
/// Displays as `[[a, b, c, d], ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdCode(Vec<PdTuple>);

impl PdCode {
    pub fn new(tuples: Vec<PdTuple>) -> Self {
        Self(tuples)
    }

    #[inline]
    pub fn tuples(&self) -> &[PdTuple] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, [a, b, c, d]) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "[{a}, {b}, {c}, {d}]")?;
        }
        f.write_str("]")
    }
}

/// What gets handed to the invariant oracle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KnotCode {
    /// Too few crossings to be anything but the unknot.
    Trivial,
    Pd(PdCode),
}

impl fmt::Display for KnotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnotCode::Trivial => f.write_str("trivial"),
            KnotCode::Pd(code) => code.fmt(f),
        }
    }
}

/// Rotates face labels left by `rotation` places.
#[inline]
fn rotate(labels: [u32; 4], rotation: usize) -> PdTuple {
    std::array::from_fn(|i| labels[(i + rotation) % 4])
}

/// Rewrites the closing strand label in the last tuple to 1.
///
/// The closing segment is the same strand the trace started on, so its
/// label must match. Only the first matching slot of the last tuple is
/// rewritten; once done the label no longer appears, so calling this again
/// changes nothing.
pub fn close_strand(tuples: &mut [PdTuple], final_strand: u32) {
    if let Some(last) = tuples.last_mut() {
        if let Some(slot) = last.iter_mut().find(|label| **label == final_strand) {
            *slot = 1;
        }
    }
}

/// Builds the crossing code for a knot trace.
///
/// `crossings` must be in emission order (first satisfied first) and
/// `final_strand` is the tracer's counter at closure.
pub fn build(crossings: &[CrossingRecord], final_strand: u32) -> KnotCode {
    if crossings.len() < MIN_NONTRIVIAL_CROSSINGS {
        return KnotCode::Trivial;
    }

    let mut tuples: Vec<PdTuple> = crossings
        .iter()
        .map(|crossing| rotate(crossing.labels, crossing.rotation()))
        .collect();
    close_strand(&mut tuples, final_strand);

    KnotCode::Pd(PdCode(tuples))
}
