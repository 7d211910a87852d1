//! Fixed-width console table

use crate::Result;
use crate::app::models::Record;
use crate::constants::{COLUMN_COUNT, COLUMN_LABELS};
use std::io::Write;

/// Render records as a table of `width`-character columns
///
/// Values wider than a column are written in full and push the rest of the
/// row right. Returns the number of data rows written.
pub fn render_console<W: Write>(records: &[&Record], writer: &mut W, width: usize) -> Result<usize> {
    for label in COLUMN_LABELS {
        write!(writer, "{:<width$}", label)?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(width * COLUMN_COUNT))?;

    for record in records {
        for (_, value) in record.labeled_values() {
            write!(writer, "{:<width$}", value)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(records.len())
}
