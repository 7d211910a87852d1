//! Range filtering over a loaded catalog
//!
//! Selects the records whose mass or year falls inside a half-open range.
//! Records missing the active field are always excluded, however wide the
//! range. The result borrows from the catalog and keeps its order.

use crate::app::models::{RangeFilter, Record};
use tracing::{debug, info};

/// Statistics for a single filtering pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStats {
    /// Records examined
    pub examined: usize,
    /// Records inside the range
    pub matched: usize,
    /// Records excluded because the active field was absent
    pub missing_value: usize,
    /// Records with a value outside the range
    pub out_of_range: usize,
}

impl FilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of examined records that matched, as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.examined == 0 {
            0.0
        } else {
            (self.matched as f64 / self.examined as f64) * 100.0
        }
    }
}

/// Apply a range filter to a catalog
///
/// # Arguments
///
/// * `records` - Catalog records in load order
/// * `filter` - Field and bounds to select on
/// * `stats` - Mutable reference to filtering statistics
///
/// # Returns
///
/// References to the matching records, in catalog order
pub fn apply_range_filter<'a>(
    records: &'a [Record],
    filter: &RangeFilter,
    stats: &mut FilterStats,
) -> Vec<&'a Record> {
    if filter.lower > filter.upper {
        debug!("Inverted range {}; no record can match", filter);
    }

    let mut selected = Vec::new();

    for record in records {
        stats.examined += 1;

        match record.value_of(filter.field) {
            None => stats.missing_value += 1,
            Some(value) if filter.contains(value) => {
                stats.matched += 1;
                selected.push(record);
            }
            Some(_) => stats.out_of_range += 1,
        }
    }

    info!(
        "Filtering on {} complete: {} -> {} records ({} missing {}, {} out of range)",
        filter,
        stats.examined,
        stats.matched,
        stats.missing_value,
        filter.field,
        stats.out_of_range
    );

    selected
}
