//! Meteorite Filter Library
//!
//! A Rust library for filtering tab-delimited meteorite landing catalogs
//! by mass or year and exporting the matching records.
//!
//! This library provides tools for:
//! - Parsing catalog lines into typed records with explicit missing values
//! - Loading whole catalogs with configurable handling of malformed lines
//! - Selecting records with a half-open numeric range over mass or year
//! - Rendering results to the console, a tab-delimited file or a spreadsheet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod catalog_loader;
        pub mod exporters;
        pub mod numeric;
        pub mod range_filter;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{FieldValue, FilterField, RangeFilter, Record};
pub use config::Config;

/// Result type alias for the meteorite filter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog loading, filtering and export operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Source file could not be opened
    #[error("Cannot open file '{path}'")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Mass, year or field count in a catalog line is malformed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O operation failed after the file was opened
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Delimited catalog text could not be read or written
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet workbook could not be built or saved
    #[error("Spreadsheet error: {message}")]
    Spreadsheet {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// User-supplied value rejected
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    /// Create a file access error for the given path
    pub fn file_access(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error for a standalone line
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            line: 0,
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            message: message.into(),
            source,
        }
    }

    /// Create a spreadsheet error with context
    pub fn spreadsheet(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Attach a source line number to a parse error; other variants pass through
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse { line, message },
            other => other,
        }
    }

    /// Whether this error came from malformed catalog content
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: "Delimited I/O failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet {
            message: "Workbook operation failed".to_string(),
            source: error,
        }
    }
}
