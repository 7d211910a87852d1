//! Exporters for filtered meteorite records
//!
//! Three sinks render the same twelve-column layout:
//! - [`console`] - fixed-width table written to any `Write`
//! - [`delimited`] - tab-separated text that loads back as a catalog
//! - [`spreadsheet`] - single-sheet `.xlsx` workbook
//!
//! File sinks are named after the local time of the export, see [`naming`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use meteorite_filter::app::services::exporters::{export, OutputSink};
//! use meteorite_filter::Config;
//!
//! # fn example(records: &[&meteorite_filter::Record]) -> meteorite_filter::Result<()> {
//! let report = export(OutputSink::Text, records, &Config::default(), &mut std::io::stdout())?;
//! println!("{} rows written", report.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod console;
pub mod delimited;
pub mod naming;
pub mod spreadsheet;

#[cfg(test)]
mod tests;

use crate::app::models::Record;
use crate::config::Config;
use crate::constants::{SPREADSHEET_EXTENSION, TEXT_EXTENSION};
use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

pub use console::render_console;
pub use delimited::write_delimited;
pub use naming::{output_path, sanitize_file_stem, timestamp_file_stem};
pub use spreadsheet::write_spreadsheet;

/// Where filtered records are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSink {
    Console,
    Text,
    Spreadsheet,
}

impl OutputSink {
    /// Sinks in menu order
    pub const ALL: [OutputSink; 3] = [OutputSink::Console, OutputSink::Text, OutputSink::Spreadsheet];

    pub fn label(&self) -> &'static str {
        match self {
            OutputSink::Console => "console",
            OutputSink::Text => "text",
            OutputSink::Spreadsheet => "spreadsheet",
        }
    }

    /// File extension for file sinks
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputSink::Console => None,
            OutputSink::Text => Some(TEXT_EXTENSION),
            OutputSink::Spreadsheet => Some(SPREADSHEET_EXTENSION),
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputSink {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OutputSink::ALL
            .into_iter()
            .find(|sink| sink.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown output '{}'. Available outputs: console, text, spreadsheet",
                    s
                ))
            })
    }
}

/// Outcome of one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub sink: OutputSink,
    /// Data rows written, excluding the header
    pub rows_written: usize,
    /// File written, `None` for the console
    pub destination: Option<PathBuf>,
}

/// Export records to a sink, naming files after the current local time
///
/// `console` receives the table for [`OutputSink::Console`] and is untouched otherwise.
pub fn export<W: Write>(
    sink: OutputSink,
    records: &[&Record],
    config: &Config,
    console: &mut W,
) -> Result<ExportReport> {
    export_at(sink, records, config, console, Local::now().naive_local())
}

/// Export records to a sink using an explicit timestamp for file names
pub fn export_at<W: Write>(
    sink: OutputSink,
    records: &[&Record],
    config: &Config,
    console: &mut W,
    timestamp: NaiveDateTime,
) -> Result<ExportReport> {
    let (rows_written, destination) = match sink {
        OutputSink::Console => (render_console(records, console, config.column_width)?, None),
        OutputSink::Text => {
            let path = prepare_output_file(sink, config, timestamp)?;
            let mut file = File::create(&path)
                .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
            let rows = write_delimited(records, &mut file)?;
            (rows, Some(path))
        }
        OutputSink::Spreadsheet => {
            let path = prepare_output_file(sink, config, timestamp)?;
            let rows = write_spreadsheet(records, &path, &config.sheet_name)?;
            (rows, Some(path))
        }
    };

    match &destination {
        Some(path) => info!("Wrote {} records to {}", rows_written, path.display()),
        None => info!("Printed {} records to the console", rows_written),
    }

    Ok(ExportReport {
        sink,
        rows_written,
        destination,
    })
}

fn prepare_output_file(
    sink: OutputSink,
    config: &Config,
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    config.ensure_output_directory()?;
    let extension = sink.extension().unwrap_or(TEXT_EXTENSION);
    Ok(output_path(
        &config.output_dir,
        &timestamp_file_stem(timestamp),
        extension,
    ))
}
