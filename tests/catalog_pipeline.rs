//! End-to-end corpus runs against files on disk.

use std::fs;
use std::path::Path;

use knot_mosaic::error::OracleError;
use knot_mosaic::oracle::{InvariantOracle, PdKeyOracle};
use knot_mosaic::pd::PdCode;
use knot_mosaic::persistence::{self, CatalogWriter, Corpus};
use knot_mosaic::run::{run_catalog, RunReport};

/// Refuses every non-trivial code.
struct UnavailableEngine;

impl InvariantOracle for UnavailableEngine {
    type Invariant = String;

    fn trivial(&self) -> String {
        "1".to_string()
    }

    fn invariant_of(&self, _code: &PdCode) -> Result<String, OracleError> {
        Err(OracleError::EmptyOutput)
    }
}

fn run_file<O>(dir: &Path, corpus_text: &str, oracle: &O) -> (RunReport<String>, String)
where
    O: InvariantOracle<Invariant = String> + Sync,
{
    let input = dir.join("corpus.txt");
    let output = dir.join("catalog.txt");
    fs::write(&input, corpus_text).unwrap();

    let corpus = Corpus::open(&input).unwrap();
    let writer = CatalogWriter::create(&output).unwrap();
    let report = run_catalog(corpus, oracle, writer, 1).unwrap();
    (report, fs::read_to_string(&output).unwrap())
}

#[test]
fn single_crossing_unknot_is_cataloged_once() {
    let dir = tempfile::tempdir().unwrap();
    let (report, written) = run_file(dir.path(), "000000000\n210391034\n", &PdKeyOracle);

    assert_eq!(report.catalog.len(), 1);
    assert_eq!(report.catalog.knots_seen(), 1);
    assert_eq!(report.catalog.get(&"1".to_string()), Some("210391034"));
    assert_eq!(written, "\t1: 210391034\n");
    assert_eq!(
        persistence::count_entries(dir.path().join("catalog.txt")).unwrap(),
        1
    );
}

#[test]
fn equal_invariants_keep_the_first_representative() {
    let dir = tempfile::tempdir().unwrap();
    let (report, written) = run_file(
        dir.path(),
        "000000000\n210340000\n210391034\n",
        &PdKeyOracle,
    );

    assert_eq!(report.catalog.len(), 1);
    assert_eq!(report.catalog.knots_seen(), 2);
    assert_eq!(report.summary.duplicates, 1);
    assert_eq!(report.catalog.get(&"1".to_string()), Some("210340000"));
    assert_eq!(written, "\t1: 210340000\n");
}

#[test]
fn oracle_failures_are_neither_counted_nor_cataloged() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = "0000000000000000\n0210299163943540\n2100340000000000\n";
    let (report, written) = run_file(dir.path(), corpus, &UnavailableEngine);

    assert_eq!(report.summary.oracle_errors, 1);
    assert_eq!(report.catalog.knots_seen(), 1);
    assert_eq!(report.catalog.len(), 1);
    assert_eq!(written, "\t1: 2100340000000000\n");
}

#[test]
fn mismatched_lines_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = "0000\n210391034\n2134\n";
    let (report, written) = run_file(dir.path(), corpus, &PdKeyOracle);

    assert_eq!(report.summary.mosaics, 2);
    assert_eq!(report.summary.format_errors, 1);
    assert_eq!(report.catalog.knots_seen(), 1);
    assert_eq!(written, "\t1: 2134\n");
}
