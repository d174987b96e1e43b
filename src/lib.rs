//! Knot Mosaic Classifier Library
//!
//! Traces cylindrical knot mosaics, decides whether each one is a single
//! closed curve, builds PD crossing codes for the knots, and catalogs them
//! by an externally computed invariant.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod oracle;
pub mod pd;
pub mod persistence;
pub mod run;
pub mod tiles;
pub mod tracer;

use error::FormatError;
use grid::Mosaic;
use pd::KnotCode;
use tracer::TraceReport;

/// Verdict for one mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Disconnected, unclosed, or blank; never handed to the oracle.
    NotKnot(TraceReport),
    Knot { trace: TraceReport, code: KnotCode },
}

impl Classification {
    pub fn is_knot(&self) -> bool {
        matches!(self, Classification::Knot { .. })
    }

    pub fn trace(&self) -> &TraceReport {
        match self {
            Classification::NotKnot(trace) | Classification::Knot { trace, .. } => trace,
        }
    }
}

/// Traces a mosaic and, if it is a knot, builds its crossing code.
pub fn classify(mosaic: &Mosaic) -> Result<Classification, FormatError> {
    let trace = tracer::trace(mosaic)?;
    if !trace.is_knot() {
        return Ok(Classification::NotKnot(trace));
    }
    let code = pd::build(&trace.crossings, trace.final_strand);
    Ok(Classification::Knot { trace, code })
}
