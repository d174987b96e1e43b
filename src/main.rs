//! Knot Mosaic Classifier
//!
//! Reads a corpus of cylindrical knot mosaics, keeps those that trace a
//! single closed curve through every tile, and catalogs them by knot
//! invariant so that each knot type is represented once.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use knot_mosaic::error::{FormatError, RunError};
use knot_mosaic::grid::{format_mosaic, Mosaic};
use knot_mosaic::oracle::{CommandOracle, InvariantOracle, PdKeyOracle, UNKNOT_INVARIANT};
use knot_mosaic::persistence::{self, CatalogWriter, Corpus};
use knot_mosaic::run::run_catalog;
use knot_mosaic::{classify, Classification};

/// Classifies cylindrical knot mosaics and catalogs them by invariant.
#[derive(Parser)]
#[command(name = "knot-mosaic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log per-mosaic decisions (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a mosaic corpus and write one catalog line per new invariant.
    Catalog {
        /// Corpus file; the first line is an all-blank mosaic fixing the size.
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Catalog file to create.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Worker threads.
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,

        /// Invariant reported for diagrams with fewer than three crossings.
        #[arg(long, default_value = UNKNOT_INVARIANT)]
        trivial: String,

        /// Invariant program and its arguments; reads a PD code on stdin.
        #[arg(long, num_args = 1.., value_name = "PROGRAM", allow_hyphen_values = true)]
        oracle: Option<Vec<OsString>>,
    },
    /// Trace a single mosaic line and print its crossing code.
    Trace {
        /// Encoded mosaic, one hexadecimal symbol per tile.
        mosaic: String,
    },
    /// Show the number of entries in a catalog file.
    Count {
        #[arg(value_name = "FILE")]
        catalog: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Catalog {
            input,
            output,
            jobs,
            trivial,
            oracle,
        } => match oracle {
            Some(command) => {
                let mut command = command.into_iter();
                // clap guarantees at least one value
                let program = command.next().unwrap_or_default();
                let oracle = CommandOracle::new(program, command).with_trivial(trivial);
                run_catalog_file(&input, &output, &oracle, jobs)
            }
            None => {
                warn!("no --oracle given; cataloging by raw PD code");
                run_catalog_file(&input, &output, &PdKeyOracle, jobs)
            }
        },
        Command::Trace { mosaic } => run_trace(&mosaic),
        Command::Count { catalog } => run_count(&catalog),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Catalogs a corpus file and prints the knot count.
fn run_catalog_file<O>(
    input: &Path,
    output: &Path,
    oracle: &O,
    jobs: usize,
) -> Result<(), RunError>
where
    O: InvariantOracle + Sync,
    O::Invariant: Send,
{
    let corpus = Corpus::open(input)?;
    let writer = CatalogWriter::create(output)?;
    let report = run_catalog(corpus, oracle, writer, jobs)?;
    println!("{}", report.knots());
    Ok(())
}

/// Prints the picture, verdict and crossing code of one mosaic.
fn run_trace(line: &str) -> Result<(), RunError> {
    print!("{}", describe(line)?);
    Ok(())
}

fn describe(line: &str) -> Result<String, FormatError> {
    let mosaic = Mosaic::decode(line)?;
    let mut output = format_mosaic(&mosaic);
    output.push('\n');

    match classify(&mosaic)? {
        Classification::NotKnot(trace) => {
            output.push_str("knot: no\n");
            output.push_str(&format!("unsatisfied tiles: {:?}\n", trace.unsatisfied()));
        }
        Classification::Knot { trace, code } => {
            output.push_str("knot: yes\n");
            output.push_str(&format!("crossings: {}\n", trace.crossings.len()));
            output.push_str(&format!("pd: {code}\n"));
        }
    }
    Ok(output)
}

/// Prints the number of entries in a catalog file.
fn run_count(catalog: &Path) -> Result<(), RunError> {
    let count = persistence::count_entries(catalog)?;
    println!("{count} invariants");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_trefoil() {
        insta::assert_snapshot!(describe("0210299163943540").unwrap(), @r"
        ·┌┐·
        ┌┿┿┐
        │└┿┘
        └─┘·

        knot: yes
        crossings: 3
        pd: [[4, 1, 5, 2], [2, 5, 3, 6], [3, 1, 4, 6]]
        ");
    }

    #[test]
    fn test_describe_disconnected() {
        insta::assert_snapshot!(describe("2121343400000000").unwrap(), @r"
        ┌┐┌┐
        └┘└┘
        ····
        ····

        knot: no
        unsatisfied tiles: [2, 3, 6, 7]
        ");
    }

    #[test]
    fn test_describe_rejects_malformed_lines() {
        assert!(describe("3000").is_err());
        assert!(describe("12345").is_err());
    }

    #[test]
    fn test_cli_parses_oracle_command() {
        let cli = Cli::try_parse_from([
            "knot-mosaic",
            "catalog",
            "-i",
            "corpus.txt",
            "-o",
            "catalog.txt",
            "--oracle",
            "sage",
            "-c",
            "homfly.sage",
        ])
        .unwrap();
        match cli.command {
            Command::Catalog { oracle, jobs, .. } => {
                assert_eq!(jobs, 1);
                let expected: Vec<OsString> = ["sage", "-c", "homfly.sage"]
                    .into_iter()
                    .map(OsString::from)
                    .collect();
                assert_eq!(oracle, Some(expected));
            }
            _ => panic!("expected the catalog command"),
        }
    }
}
