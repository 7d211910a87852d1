//! Data models for meteorite catalog processing
//!
//! This module contains the record type for a single meteorite landing and
//! the value objects describing which records a run should keep.

use crate::app::services::catalog_loader::catalog_reader_builder;
use crate::app::services::numeric::{coerce_mass, coerce_year};
use crate::constants::{BARE_NEWLINE_TOKEN, COLUMN_COUNT, COLUMN_LABELS};
use crate::{Error, Result};
use csv::StringRecord;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Record Structure
// =============================================================================

/// One meteorite landing parsed from a catalog row
///
/// Every field is either a parsed value or `None`; an empty column never
/// becomes an empty string. Latitude and longitude are kept as text because
/// nothing filters on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: Option<String>,
    id: Option<String>,
    name_type: Option<String>,
    classification: Option<String>,
    mass_grams: Option<f64>,
    fall: Option<String>,
    year: Option<i32>,
    latitude: Option<String>,
    longitude: Option<String>,
    geo_location: Option<String>,
    state: Option<String>,
    county: Option<String>,
}

impl Record {
    /// Build a record from one delimited catalog row
    ///
    /// Rows with fewer than twelve fields leave the remaining fields absent;
    /// extra fields are accepted only when empty.
    ///
    /// # Errors
    /// * `Error::Parse` when mass or year holds non-numeric text
    /// * `Error::Parse` when a non-empty field follows the twelfth
    pub fn from_record(row: &StringRecord) -> Result<Self> {
        if let Some(extra) = row.iter().skip(COLUMN_COUNT).find(|f| !f.is_empty()) {
            return Err(Error::parse(format!(
                "Expected {} columns, found {} (unexpected value '{}')",
                COLUMN_COUNT,
                row.len(),
                extra
            )));
        }

        let field = |index: usize| row.get(index).and_then(normalize_field);
        let text = |index: usize| field(index).map(str::to_string);

        Ok(Self {
            name: text(0),
            id: text(1),
            name_type: text(2),
            classification: text(3),
            mass_grams: coerce_mass(field(4))?,
            fall: text(5),
            year: coerce_year(field(6))?,
            latitude: text(7),
            longitude: text(8),
            geo_location: text(9),
            state: text(10),
            county: text(11),
        })
    }

    /// Parse a single tab-separated catalog line
    ///
    /// A trailing `\n` or `\r\n` is ignored. An empty line gives a record
    /// with every field absent.
    pub fn from_line(line: &str) -> Result<Self> {
        let mut reader = catalog_reader_builder()
            .has_headers(false)
            .from_reader(line.as_bytes());

        let mut row = StringRecord::new();
        reader
            .read_record(&mut row)
            .map_err(|e| Error::parse(format!("Unreadable catalog line: {}", e)))?;

        Self::from_record(&row)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name_type(&self) -> Option<&str> {
        self.name_type.as_deref()
    }

    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    pub fn mass_grams(&self) -> Option<f64> {
        self.mass_grams
    }

    /// "Fell" or "Found" in well-formed catalogs
    pub fn fall(&self) -> Option<&str> {
        self.fall.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn latitude(&self) -> Option<&str> {
        self.latitude.as_deref()
    }

    pub fn longitude(&self) -> Option<&str> {
        self.longitude.as_deref()
    }

    pub fn geo_location(&self) -> Option<&str> {
        self.geo_location.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    /// Value of a filterable field widened to `f64`
    pub fn value_of(&self, field: FilterField) -> Option<f64> {
        match field {
            FilterField::Mass => self.mass_grams,
            FilterField::Year => self.year.map(f64::from),
        }
    }

    /// All twelve columns as `(label, value)` pairs in catalog order
    pub fn labeled_values(&self) -> [(&'static str, FieldValue<'_>); COLUMN_COUNT] {
        let values = [
            FieldValue::from_text(&self.name),
            FieldValue::from_text(&self.id),
            FieldValue::from_text(&self.name_type),
            FieldValue::from_text(&self.classification),
            self.mass_grams.map_or(FieldValue::Absent, FieldValue::Float),
            FieldValue::from_text(&self.fall),
            self.year.map_or(FieldValue::Absent, FieldValue::Integer),
            FieldValue::from_text(&self.latitude),
            FieldValue::from_text(&self.longitude),
            FieldValue::from_text(&self.geo_location),
            FieldValue::from_text(&self.state),
            FieldValue::from_text(&self.county),
        ];

        std::array::from_fn(|i| (COLUMN_LABELS[i], values[i]))
    }
}

/// Empty fields and bare newline tokens are missing data
fn normalize_field(raw: &str) -> Option<&str> {
    if raw.is_empty() || raw == BARE_NEWLINE_TOKEN {
        None
    } else {
        Some(raw)
    }
}

// =============================================================================
// Export Values
// =============================================================================

/// A single column value borrowed from a record for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Float(f64),
    Integer(i32),
    Absent,
}

impl<'a> FieldValue<'a> {
    fn from_text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(Self::Absent, Self::Text)
    }
}

/// Absent values render as an empty string; width and alignment flags are honoured
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.pad(text),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::Integer(value) => fmt::Display::fmt(value, f),
            Self::Absent => f.pad(""),
        }
    }
}

// =============================================================================
// Filter Configuration
// =============================================================================

/// Numeric record fields a range filter can select on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Mass,
    Year,
}

impl FilterField {
    /// Fields in menu order
    pub const ALL: [FilterField; 2] = [FilterField::Mass, FilterField::Year];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Mass => "mass",
            FilterField::Year => "year",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mass" => Ok(FilterField::Mass),
            "year" => Ok(FilterField::Year),
            other => Err(Error::validation(format!(
                "Unknown filter field '{}'. Available fields: mass, year",
                other
            ))),
        }
    }
}

/// Half-open range `[lower, upper)` over one numeric field
///
/// `lower <= upper` is not required; an inverted range simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub field: FilterField,
    pub lower: f64,
    pub upper: f64,
}

impl RangeFilter {
    pub fn new(field: FilterField, lower: f64, upper: f64) -> Self {
        Self {
            field,
            lower,
            upper,
        }
    }

    /// Whether a record falls inside the range; records missing the field never match
    pub fn matches(&self, record: &Record) -> bool {
        record
            .value_of(self.field)
            .is_some_and(|value| self.contains(value))
    }

    /// Lower bound inclusive, upper bound exclusive
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in [{}, {})", self.field, self.lower, self.upper)
    }
}
