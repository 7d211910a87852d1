//! Tab-delimited text output
//!
//! Writes the same shape the catalog loader reads: one header line, then one
//! line of twelve tab-separated values per record, absent values left empty.
//! Values are never quoted.

use crate::Result;
use crate::app::models::Record;
use crate::constants::{COLUMN_LABELS, FIELD_DELIMITER};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Write records as a tab-delimited catalog, returning the number of data lines
pub fn write_delimited<W: Write>(records: &[&Record], writer: &mut W) -> Result<usize> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    csv_writer.write_record(COLUMN_LABELS)?;

    for record in records {
        csv_writer.write_record(
            record
                .labeled_values()
                .iter()
                .map(|(_, value)| value.to_string()),
        )?;
    }

    csv_writer.flush()?;
    Ok(records.len())
}
