//! Error types for decoding, tracing, invariant lookup and corpus runs.

use std::process::ExitStatus;

use crate::geometry::Face;

/// A mosaic line that cannot be turned into a traceable diagram.
///
/// Fatal for the offending line only; a corpus run logs it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("empty mosaic line")]
    Empty,

    #[error("unmapped tile symbol {symbol:?} at position {position}")]
    UnmappedSymbol { symbol: char, position: usize },

    #[error("mosaic length {length} is not a perfect square")]
    NotSquare { length: usize },

    #[error("mosaic length {length} does not match the corpus length {expected}")]
    LengthMismatch { length: usize, expected: usize },

    /// The strand reached a tile through a face none of its rules use.
    #[error("strand enters tile {tile} through its {face} face, which has no connection")]
    DanglingStrand { tile: usize, face: Face },

    /// The strand left the board through the top or bottom edge.
    #[error("strand leaves tile {tile} through the {face} edge of the board")]
    OffGrid { tile: usize, face: Face },
}

/// The invariant oracle could not produce a value for a crossing code.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("failed to run invariant command: {0}")]
    Launch(#[source] std::io::Error),

    #[error("invariant command exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("invariant command produced no output")]
    EmptyOutput,

    #[error("invariant command output is not valid UTF-8")]
    InvalidOutput,
}

/// Errors that abort a whole corpus run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("corpus header is not a valid mosaic: {0}")]
    Header(#[source] FormatError),

    #[error("corpus is empty")]
    MissingHeader,

    #[error("invalid mosaic: {0}")]
    Mosaic(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
