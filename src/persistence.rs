//! Corpus input and catalog file I/O.
//!
//! Corpus files hold one encoded mosaic per line. The first line is an
//! all-blank mosaic that only fixes the board size; it is not classified.
//!
//! Catalog files hold one entry per novel invariant:
//! - `\t{invariant}: {mosaic}\n`

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use crate::error::RunError;
use crate::grid::Mosaic;

/// One mosaic line from a corpus, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLine {
    pub number: usize,
    pub text: String,
}

/// Line reader over a mosaic corpus.
///
/// Reading the header happens on construction; iteration yields the
/// remaining non-empty lines, trimmed.
pub struct Corpus<R> {
    side: usize,
    lines: Lines<R>,
    line_number: usize,
}

impl Corpus<BufReader<File>> {
    /// Opens a corpus file and reads its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RunError> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> Corpus<R> {
    pub fn new(reader: R) -> Result<Self, RunError> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or(RunError::MissingHeader)??;
        let side = Mosaic::decode(&header).map_err(RunError::Header)?.side();
        Ok(Self {
            side,
            lines,
            line_number: 1,
        })
    }

    /// Board side length fixed by the header.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }
}

impl<R: BufRead> Iterator for Corpus<R> {
    type Item = io::Result<CorpusLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_number += 1;
            let text = line.trim();
            if !text.is_empty() {
                return Some(Ok(CorpusLine {
                    number: self.line_number,
                    text: text.to_string(),
                }));
            }
        }
    }
}

/// Appends catalog entries, flushing after each one so an interrupted run
/// leaves a usable partial catalog.
pub struct CatalogWriter<W: Write> {
    out: W,
}

impl CatalogWriter<BufWriter<File>> {
    /// Creates (or truncates) a catalog file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CatalogWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one entry and flushes.
    pub fn append(&mut self, invariant: &impl Display, mosaic: &str) -> io::Result<()> {
        writeln!(self.out, "\t{invariant}: {mosaic}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Parses catalog entries back into `(invariant, mosaic)` pairs.
///
/// Lines without a `": "` separator are skipped.
pub fn read_catalog(reader: impl BufRead) -> io::Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some((invariant, mosaic)) = line.trim().rsplit_once(": ") {
            entries.push((invariant.trim().to_string(), mosaic.trim().to_string()));
        }
    }
    Ok(entries)
}

/// Returns the number of entries in a catalog file.
pub fn count_entries(path: impl AsRef<Path>) -> io::Result<usize> {
    let file = File::open(path)?;
    Ok(read_catalog(BufReader::new(file))?.len())
}
