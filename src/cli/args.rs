//! Command-line argument definitions for the meteorite filter
//!
//! This module defines the CLI interface using the clap derive API. Any
//! answer not given here is asked for interactively.

use crate::app::models::FilterField;
use crate::app::services::catalog_loader::{AccessMode, ParseErrorPolicy};
use crate::app::services::exporters::OutputSink;
use crate::cli::input::RequestDraft;
use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the meteorite catalog filter
///
/// Reads a tab-delimited meteorite landing catalog, keeps the records whose
/// mass or year falls in a range, and writes them to the console, a text
/// file or a spreadsheet.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "meteorite-filter",
    version,
    about = "Filter a meteorite landing catalog by mass or year",
    long_about = "Reads a tab-delimited meteorite landing catalog, keeps the records whose mass or \
                  year lies in [LOWER, UPPER) and writes them to the console, a tab-delimited text \
                  file or a spreadsheet. Any option left out is asked for interactively."
)]
pub struct Args {
    /// Catalog file to read (first line is a header)
    #[arg(value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Mode the catalog file is opened with
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        help = "File open mode: r (read), w (truncate), x (exclusive create), a (append)"
    )]
    pub mode: Option<ModeArg>,

    /// Field to filter on
    #[arg(short = 'f', long = "field", value_enum)]
    pub field: Option<FieldArg>,

    /// Inclusive lower bound
    #[arg(long = "lower", value_name = "N", allow_negative_numbers = true)]
    pub lower: Option<f64>,

    /// Exclusive upper bound
    #[arg(long = "upper", value_name = "N", allow_negative_numbers = true)]
    pub upper: Option<f64>,

    /// Where to send the filtered records
    #[arg(short = 'o', long = "output", value_enum)]
    pub output: Option<SinkArg>,

    /// Directory for text and spreadsheet exports
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Console column width in characters
    #[arg(long = "column-width", value_name = "N")]
    pub column_width: Option<usize>,

    /// Worksheet name for spreadsheet exports
    #[arg(long = "sheet-name", value_name = "NAME")]
    pub sheet_name: Option<String>,

    /// Skip catalog lines with malformed mass or year instead of aborting
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    #[value(name = "r")]
    Read,
    #[value(name = "w")]
    Write,
    #[value(name = "x")]
    Exclusive,
    #[value(name = "a")]
    Append,
}

impl From<ModeArg> for AccessMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Read => AccessMode::Read,
            ModeArg::Write => AccessMode::Write,
            ModeArg::Exclusive => AccessMode::Exclusive,
            ModeArg::Append => AccessMode::Append,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    Mass,
    Year,
}

impl From<FieldArg> for FilterField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Mass => FilterField::Mass,
            FieldArg::Year => FilterField::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkArg {
    /// Fixed-width table on standard output
    Console,
    /// Tab-delimited text file
    Text,
    /// Spreadsheet workbook
    Spreadsheet,
}

impl From<SinkArg> for OutputSink {
    fn from(sink: SinkArg) -> Self {
        match sink {
            SinkArg::Console => OutputSink::Console,
            SinkArg::Text => OutputSink::Text,
            SinkArg::Spreadsheet => OutputSink::Spreadsheet,
        }
    }
}

impl Args {
    /// Validate argument values that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("--lower", self.lower), ("--upper", self.upper)] {
            if bound.is_some_and(f64::is_nan) {
                return Err(Error::validation(format!("{} must be a number", name)));
            }
        }
        Ok(())
    }

    /// Log level implied by -v / -q
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Answers already given on the command line
    pub fn request_draft(&self) -> RequestDraft {
        RequestDraft {
            input_file: self.input_file.clone(),
            mode: self.mode.map(AccessMode::from),
            field: self.field.map(FilterField::from),
            lower: self.lower,
            upper: self.upper,
            sink: self.output.map(OutputSink::from),
        }
    }

    /// Apply CLI overrides on top of a configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(width) = self.column_width {
            config.column_width = width;
        }
        if let Some(name) = &self.sheet_name {
            config.sheet_name = name.clone();
        }
        if self.skip_invalid {
            config.parse_error_policy = ParseErrorPolicy::Skip;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_non_interactive_args() {
        let args = Args::try_parse_from([
            "meteorite-filter",
            "landings.txt",
            "--field",
            "year",
            "--lower",
            "1990",
            "--upper",
            "2000",
            "--output",
            "text",
            "--mode",
            "a",
        ])
        .unwrap();

        let request = args.request_draft().complete().unwrap();
        assert_eq!(request.input_file, PathBuf::from("landings.txt"));
        assert_eq!(request.mode, AccessMode::Append);
        assert_eq!(request.filter.field, FilterField::Year);
        assert_eq!(request.filter.lower, 1990.0);
        assert_eq!(request.filter.upper, 2000.0);
        assert_eq!(request.sink, OutputSink::Text);
    }

    #[test]
    fn test_negative_bounds() {
        let args =
            Args::try_parse_from(["meteorite-filter", "--lower", "-5.5", "--upper", "-1"]).unwrap();
        assert_eq!(args.lower, Some(-5.5));
        assert_eq!(args.upper, Some(-1.0));
        assert!(args.request_draft().complete().is_none());
    }

    #[test]
    fn test_invalid_values_rejected_by_parser() {
        assert!(Args::try_parse_from(["meteorite-filter", "--field", "reclat"]).is_err());
        assert!(Args::try_parse_from(["meteorite-filter", "--mode", "rw"]).is_err());
        assert!(Args::try_parse_from(["meteorite-filter", "--lower", "low"]).is_err());
        assert!(Args::try_parse_from(["meteorite-filter", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_nan_bound_fails_validation() {
        let args = Args::try_parse_from(["meteorite-filter", "--lower", "NaN"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_levels() {
        let args = Args::try_parse_from(["meteorite-filter"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");

        let args = Args::try_parse_from(["meteorite-filter", "-vv"]).unwrap();
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::try_parse_from(["meteorite-filter", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_apply_to_config() {
        let args = Args::try_parse_from([
            "meteorite-filter",
            "--output-dir",
            "exports",
            "--column-width",
            "12",
            "--sheet-name",
            "landings",
            "--skip-invalid",
        ])
        .unwrap();
        let mut config = Config::default();

        args.apply_to(&mut config);

        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.column_width, 12);
        assert_eq!(config.sheet_name, "landings");
        assert_eq!(config.parse_error_policy, ParseErrorPolicy::Skip);
    }
}
