//! Catalog loading from tab-delimited meteorite files
//!
//! This module opens a catalog file, skips its header line and parses every
//! remaining row into a [`Record`], preserving file order. Rows are read with
//! a tab-delimited `csv` reader: quotes are literal and row lengths may vary.
//! Empty lines carry no row and are passed over.
//!
//! Malformed numeric columns abort the load by default. With
//! [`ParseErrorPolicy::Skip`] the offending line is dropped and reported in
//! [`LoadStats`] instead.

use crate::app::models::Record;
use crate::constants::FIELD_DELIMITER;
use crate::{Error, Result};
use csv::{Position, ReaderBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a source file is opened before reading
///
/// Every mode grants read access. `Write` truncates the file first, so the
/// resulting catalog is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    #[default]
    Read,
    Write,
    Exclusive,
    Append,
}

impl AccessMode {
    /// Modes in prompt order
    pub const ALL: [AccessMode; 4] = [
        AccessMode::Read,
        AccessMode::Write,
        AccessMode::Exclusive,
        AccessMode::Append,
    ];

    /// Single-letter code used on the command line and at the prompt
    pub fn code(&self) -> &'static str {
        match self {
            AccessMode::Read => "r",
            AccessMode::Write => "w",
            AccessMode::Exclusive => "x",
            AccessMode::Append => "a",
        }
    }

    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true);
        match self {
            AccessMode::Read => {}
            AccessMode::Write => {
                options.write(true).truncate(true).create(true);
            }
            AccessMode::Exclusive => {
                options.write(true).create_new(true);
            }
            AccessMode::Append => {
                options.append(true).create(true);
            }
        }
        options
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AccessMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AccessMode::ALL
            .into_iter()
            .find(|mode| mode.code() == s)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown file mode '{}'. Available modes: r, w, x, a",
                    s
                ))
            })
    }
}

/// What to do with a line whose mass or year cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Stop at the first malformed line and return its error
    #[default]
    Abort,
    /// Drop the line, record the error and keep loading
    Skip,
}

/// Statistics for a catalog load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    /// Data rows read, excluding the header
    pub lines_read: usize,
    /// Records added to the catalog
    pub records_loaded: usize,
    /// Lines dropped under the skip policy
    pub lines_rejected: usize,
    /// Messages for each rejected line
    pub error_messages: Vec<String>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejected line
    pub fn add_error(&mut self, message: String) {
        self.lines_rejected += 1;
        self.error_messages.push(message);
    }
}

/// Ordered, read-only collection of loaded records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    stats: LoadStats,
}

impl Catalog {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reader settings shared by catalog loading and single-line parsing
pub fn catalog_reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .quoting(false);
    builder
}

/// Load a catalog file
///
/// # Arguments
/// * `path` - Catalog file to read
/// * `mode` - Access mode the file is opened with
/// * `policy` - Handling of lines with malformed numeric columns
///
/// # Errors
/// * Returns `Error::FileAccess` if the file cannot be opened
/// * Returns `Error::Parse` for the first malformed line under `ParseErrorPolicy::Abort`
/// * Returns `Error::Csv` if reading fails part way
pub fn load_catalog(path: &Path, mode: AccessMode, policy: ParseErrorPolicy) -> Result<Catalog> {
    info!(
        "Loading catalog from {} (mode '{}', {:?} on parse errors)",
        path.display(),
        mode,
        policy
    );

    let file = mode
        .open_options()
        .open(path)
        .map_err(|e| Error::file_access(path.display().to_string(), e))?;

    load_catalog_from_reader(file, &path.display().to_string(), policy)
}

/// Load a catalog from any reader
///
/// The first line is treated as a header and discarded. `source` is used in
/// log and error messages only.
pub fn load_catalog_from_reader<R: Read>(
    reader: R,
    source: &str,
    policy: ParseErrorPolicy,
) -> Result<Catalog> {
    let start_time = Instant::now();
    let mut records = Vec::new();
    let mut stats = LoadStats::new();

    let mut csv_reader = catalog_reader_builder().from_reader(reader);

    let header = csv_reader
        .headers()
        .map_err(|e| Error::csv(format!("Failed to read header of {}", source), e))?;
    if header.is_empty() {
        warn!("{} is empty; no header or records found", source);
        return Ok(Catalog { records, stats });
    }
    debug!("Skipping header of {}: {:?}", source, header);

    for result in csv_reader.records() {
        let parsed = match result {
            Ok(row) => {
                stats.lines_read += 1;
                Record::from_record(&row).map_err(|e| e.at_line(line_of(row.position())))
            }
            Err(e) if e.is_io_error() => {
                return Err(Error::csv(format!("Failed to read {}", source), e));
            }
            Err(e) => {
                stats.lines_read += 1;
                Err(Error::Parse {
                    line: line_of(e.position()),
                    message: e.to_string(),
                })
            }
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(e) => match policy {
                ParseErrorPolicy::Abort => return Err(e),
                ParseErrorPolicy::Skip => {
                    warn!("Skipping row of {}: {}", source, e);
                    stats.add_error(e.to_string());
                }
            },
        }
    }

    stats.records_loaded = records.len();

    info!(
        "Loaded {} records from {} in {:.2?} ({} lines read, {} rejected)",
        stats.records_loaded,
        source,
        start_time.elapsed(),
        stats.lines_read,
        stats.lines_rejected
    );

    Ok(Catalog { records, stats })
}

/// Physical line a row started on; the header is line 1
fn line_of(position: Option<&Position>) -> usize {
    position.map_or(0, |p| p.line() as usize)
}
