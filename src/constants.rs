//! Application constants for the meteorite filter
//!
//! This module contains the catalog column layout, default values,
//! prompt texts and quit tokens used throughout the application.

// =============================================================================
// Catalog Layout
// =============================================================================

/// Number of tab-separated columns in a catalog line
pub const COLUMN_COUNT: usize = 12;

/// Column labels in catalog order, as written in the header line
pub const COLUMN_LABELS: [&str; COLUMN_COUNT] = [
    "name",
    "id",
    "nametype",
    "recclass",
    "mass (g)",
    "fall",
    "year",
    "reclat",
    "reclong",
    "GeoLocation",
    "States",
    "Counties",
];

/// Field delimiter byte for catalog files
pub const FIELD_DELIMITER: u8 = b'\t';

/// Raw field token that the original catalogs use for a missing county
pub const BARE_NEWLINE_TOKEN: &str = "\n";

// =============================================================================
// Export Defaults
// =============================================================================

/// Default width of a console table column
pub const DEFAULT_COLUMN_WIDTH: usize = 30;

/// Widest console column accepted by configuration
pub const MAX_COLUMN_WIDTH: usize = 200;

/// Default worksheet name for spreadsheet output
pub const DEFAULT_SHEET_NAME: &str = "filteredMeteoriteData";

/// Longest worksheet name a workbook accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters a worksheet name cannot contain
pub const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Characters replaced with underscores when a timestamp becomes a file name
pub const FILE_STEM_REPLACED_CHARS: &[char] = &[':', '.', ' '];

/// Extension for delimited text output
pub const TEXT_EXTENSION: &str = "txt";

/// Extension for spreadsheet output
pub const SPREADSHEET_EXTENSION: &str = "xlsx";

// =============================================================================
// Environment Variables
// =============================================================================

pub mod env_vars {
    /// Directory where text and spreadsheet exports are written
    pub const OUTPUT_DIR: &str = "METEORITE_FILTER_OUTPUT_DIR";

    /// Console column width
    pub const COLUMN_WIDTH: &str = "METEORITE_FILTER_COLUMN_WIDTH";

    /// Worksheet name for spreadsheet exports
    pub const SHEET_NAME: &str = "METEORITE_FILTER_SHEET_NAME";
}

// =============================================================================
// Interactive Prompts
// =============================================================================

pub mod prompts {
    pub const FILE_NAME: &str = "Enter the name of a file containing meteorite data that you would like filtered, with file extension included(ex: \"file_name.txt\")\nEnter \">q\" or \">Q\" to quit\n>>";

    pub const FILE_MODE: &str = "What mode would you like to open the file with?\n\"r\" - open for reading(default)\n\"w\" - open for writing, truncating the file first. (WARNING: this mode will delete the contents of an existing file!)\n\"x\" - open for exclusive creation, failing if the file already exists\n\"a\" - open for writing, appending to the end of file if it exists\nEnter \">q\" or \">Q\" to quit\n>>";

    pub const FILTER_FIELD: &str =
        "What parameter would you like to filter the meteorites by?\n1. Mass\n2. Year\n3. Quit\n>>";

    pub const LOWER_BOUND: &str =
        "What is the lower bound of your filtering parameter?(inclusive)(\"Q\" to quit)\n>>";

    pub const UPPER_BOUND: &str =
        "What is the upper bound of your filtering parameter?(exclusive)(\"Q\" to quit)\n>>";

    pub const OUTPUT_SINK: &str = "What output format would you like to use?\n1. print to console\n2. write to a text file\n3. write to an excel file\n4. Quit\n>>";

    pub const QUITTING: &str = "Quitting program now...";
}

/// Quit tokens for the file name and file mode prompts
pub const PATH_QUIT_TOKENS: &[&str] = &[">q", ">Q"];

/// Quit tokens for the bound prompts
pub const BOUND_QUIT_TOKENS: &[&str] = &["q", "Q"];

/// Welcome banner shown before an interactive session
pub const WELCOME_BANNER: &str = "Welcome to the meteorite filtering program. This program reads a text file containing meteorite data and outputs a\nlist of meteorites filtered on either a range of mass or year of landing, as set by the user.";

/// Message shown after a completed run
pub const EXIT_MESSAGE: &str = "Execution complete";
