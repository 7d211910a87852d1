//! Spreadsheet workbook output
//!
//! Writes a single worksheet: column labels in row 0, then one record per row.
//! Mass and year become numeric cells, everything else string cells. Absent
//! values leave the cell blank.

use crate::app::models::{FieldValue, Record};
use crate::constants::COLUMN_LABELS;
use crate::{Error, Result};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::debug;

/// Write records to an `.xlsx` workbook at `path`, returning the number of data rows
pub fn write_spreadsheet(records: &[&Record], path: &Path, sheet_name: &str) -> Result<usize> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::spreadsheet(format!("Invalid sheet name '{}'", sheet_name), e))?;

    for (col, label) in COLUMN_LABELS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *label)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| {
            Error::validation(format!("Too many records for one worksheet: {}", records.len()))
        })?;

        for (col, (_, value)) in record.labeled_values().into_iter().enumerate() {
            let col = col as u16;
            match value {
                FieldValue::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                FieldValue::Float(number) => {
                    worksheet.write_number(row, col, number)?;
                }
                FieldValue::Integer(number) => {
                    worksheet.write_number(row, col, number)?;
                }
                FieldValue::Absent => {}
            }
        }
    }

    debug!(
        "Saving worksheet '{}' with {} rows to {}",
        sheet_name,
        records.len(),
        path.display()
    );

    workbook
        .save(path)
        .map_err(|e| Error::spreadsheet(format!("Failed to save {}", path.display()), e))?;

    Ok(records.len())
}
