//! Invariant oracle interface.
//!
//! The oracle turns a crossing code into a comparable invariant. Two
//! crossing codes must give equal invariants exactly when they describe
//! equivalent knots; this crate assumes that contract and never checks it.

use std::ffi::OsString;
use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::OracleError;
use crate::pd::{KnotCode, PdCode};

/// Computes knot invariants from crossing codes.
pub trait InvariantOracle {
    type Invariant: Clone + Eq + Hash + Display;

    /// Invariant of the unknot, used for trivial codes.
    fn trivial(&self) -> Self::Invariant;

    /// Invariant of a non-trivial crossing code.
    fn invariant_of(&self, code: &PdCode) -> Result<Self::Invariant, OracleError>;

    fn invariant(&self, code: &KnotCode) -> Result<Self::Invariant, OracleError> {
        match code {
            KnotCode::Trivial => Ok(self.trivial()),
            KnotCode::Pd(code) => self.invariant_of(code),
        }
    }
}

/// HOMFLY polynomial of the unknot.
pub const UNKNOT_INVARIANT: &str = "1";

/// Delegates invariant computation to an external program.
///
/// For every code the program is started once, receives the code followed
/// by a newline on stdin, and must print the invariant on stdout.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: OsString,
    args: Vec<OsString>,
    trivial: String,
}

impl CommandOracle {
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            trivial: UNKNOT_INVARIANT.to_string(),
        }
    }

    /// Overrides the invariant reported for trivial codes.
    pub fn with_trivial(mut self, trivial: impl Into<String>) -> Self {
        self.trivial = trivial.into();
        self
    }
}

impl InvariantOracle for CommandOracle {
    type Invariant = String;

    fn trivial(&self) -> String {
        self.trivial.clone()
    }

    fn invariant_of(&self, code: &PdCode) -> Result<String, OracleError> {
        debug!(crossings = code.len(), "querying invariant command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(OracleError::Launch)?;

        if let Some(mut stdin) = child.stdin.take() {
            // a program that exits without reading stdin is judged by its status below
            let _ = writeln!(stdin, "{code}");
        }

        let output = child.wait_with_output().map_err(OracleError::Launch)?;
        if !output.status.success() {
            return Err(OracleError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| OracleError::InvalidOutput)?;
        let invariant = stdout.trim();
        if invariant.is_empty() {
            return Err(OracleError::EmptyOutput);
        }
        Ok(invariant.to_string())
    }
}

/// Keys the catalog by the crossing code text itself.
///
/// Only identical codes are merged, so this is no knot invariant. It
/// serves dry runs when no external engine is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdKeyOracle;

impl InvariantOracle for PdKeyOracle {
    type Invariant = String;

    fn trivial(&self) -> String {
        UNKNOT_INVARIANT.to_string()
    }

    fn invariant_of(&self, code: &PdCode) -> Result<String, OracleError> {
        Ok(code.to_string())
    }
}
