//! Corpus driver: classify every mosaic line and catalog the knots.
//!
//! With one job, lines are processed in input order on the calling thread.
//! With more, scoped worker threads pull lines from a shared corpus and
//! query the oracle concurrently; the catalog test-and-insert and the
//! catalog write happen under a single lock so no invariant ever gets two
//! representatives.

use std::fmt::Display;
use std::hash::Hash;
use std::io::{BufRead, Write};
use std::sync::Mutex;
use std::thread;

use tracing::{debug, error, info, warn};

use crate::catalog::InvariantCatalog;
use crate::error::{FormatError, OracleError, RunError};
use crate::grid::Mosaic;
use crate::oracle::InvariantOracle;
use crate::persistence::{CatalogWriter, Corpus, CorpusLine};
use crate::{classify, Classification};

/// Tally of per-line outcomes over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Mosaic lines read, excluding the header.
    pub mosaics: usize,
    /// Lines that decoded and traced but are not a single closed curve.
    pub rejected: usize,
    pub format_errors: usize,
    pub oracle_errors: usize,
    /// Knots whose invariant was new.
    pub new_invariants: usize,
    /// Knots whose invariant was already cataloged.
    pub duplicates: usize,
}

/// Final state of a run.
#[derive(Debug)]
pub struct RunReport<I> {
    pub summary: RunSummary,
    pub catalog: InvariantCatalog<I>,
}

impl<I> RunReport<I> {
    /// Total mosaics confirmed to be knots.
    pub fn knots(&self) -> u64 {
        self.summary.new_invariants as u64 + self.summary.duplicates as u64
    }
}

/// What happened to one line before it reaches the catalog.
enum Processed<I> {
    NotKnot(Vec<usize>),
    Format(FormatError),
    Oracle(OracleError),
    Knot(I),
}

fn process_line<O: InvariantOracle>(
    line: &CorpusLine,
    side: usize,
    oracle: &O,
) -> Processed<O::Invariant> {
    let mosaic = match Mosaic::decode_with_side(&line.text, side) {
        Ok(mosaic) => mosaic,
        Err(e) => return Processed::Format(e),
    };
    match classify(&mosaic) {
        Err(e) => Processed::Format(e),
        Ok(Classification::NotKnot(report)) => Processed::NotKnot(report.unsatisfied()),
        Ok(Classification::Knot { code, .. }) => match oracle.invariant(&code) {
            Ok(invariant) => Processed::Knot(invariant),
            Err(e) => Processed::Oracle(e),
        },
    }
}

/// Catalog, writer and tally shared by all workers.
struct RunState<I, W: Write> {
    catalog: InvariantCatalog<I>,
    writer: CatalogWriter<W>,
    summary: RunSummary,
}

impl<I: Clone + Eq + Hash + Display, W: Write> RunState<I, W> {
    fn record(&mut self, line: &CorpusLine, processed: Processed<I>) -> Result<(), RunError> {
        self.summary.mosaics += 1;
        match processed {
            Processed::NotKnot(unsatisfied) => {
                debug!(line = line.number, ?unsatisfied, "not a knot");
                self.summary.rejected += 1;
            }
            Processed::Format(e) => {
                warn!(line = line.number, mosaic = %line.text, "skipping malformed mosaic: {e}");
                self.summary.format_errors += 1;
            }
            Processed::Oracle(e) => {
                error!(line = line.number, mosaic = %line.text, "invariant lookup failed: {e}");
                self.summary.oracle_errors += 1;
            }
            Processed::Knot(invariant) => {
                self.catalog.record_knot();
                let lookup = self.catalog.lookup_or_insert(invariant.clone(), &line.text);
                if lookup.is_new {
                    info!(line = line.number, %invariant, "new invariant");
                    self.writer.append(&invariant, &line.text)?;
                    self.summary.new_invariants += 1;
                } else {
                    debug!(
                        line = line.number,
                        representative = lookup.representative,
                        "duplicate invariant"
                    );
                    self.summary.duplicates += 1;
                }
            }
        }
        Ok(())
    }
}

/// Classifies every line of `corpus` and catalogs the knots.
///
/// `jobs` is the number of worker threads; 0 is treated as 1. Novel
/// invariants are appended to `writer` as they are found.
pub fn run_catalog<O, R, W>(
    corpus: Corpus<R>,
    oracle: &O,
    writer: CatalogWriter<W>,
    jobs: usize,
) -> Result<RunReport<O::Invariant>, RunError>
where
    O: InvariantOracle + Sync,
    O::Invariant: Send,
    R: BufRead + Send,
    W: Write + Send,
{
    let side = corpus.side();
    let state = Mutex::new(RunState {
        catalog: InvariantCatalog::new(),
        writer,
        summary: RunSummary::default(),
    });
    let corpus = Mutex::new(corpus);

    let worker = || -> Result<(), RunError> {
        loop {
            // the guard is a temporary, so the corpus lock is released here
            let next = corpus.lock().unwrap_or_else(|e| e.into_inner()).next();
            let Some(line) = next else {
                return Ok(());
            };
            let line = line?;
            let processed = process_line(&line, side, oracle);
            state
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .record(&line, processed)?;
        }
    };

    let jobs = jobs.max(1);
    if jobs == 1 {
        worker()?;
    } else {
        debug!(jobs, "starting workers");
        thread::scope(|scope| {
            let handles: Vec<_> = (0..jobs).map(|_| scope.spawn(&worker)).collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect::<Result<Vec<()>, RunError>>()
        })?;
    }

    let state = state.into_inner().unwrap_or_else(|e| e.into_inner());
    info!(
        mosaics = state.summary.mosaics,
        knots = state.catalog.knots_seen(),
        invariants = state.catalog.len(),
        "run complete"
    );
    Ok(RunReport {
        summary: state.summary,
        catalog: state.catalog,
    })
}
