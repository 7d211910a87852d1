//! Test utilities for exporter testing
//!
//! Shared record fixtures used by the sink-specific test modules.

use crate::app::models::Record;

mod export_tests;

/// Two records from the reference scenario: A complete, B without mass
pub fn scenario_records() -> Vec<Record> {
    [
        "A\t1\tValid\tL6\t10.5\tFell\t1990\t10\t20\tloc\tST\tCT\n",
        "B\t2\tValid\tH5\t\tFound\t2000\t11\t21\tloc2\tST2\tCT2\n",
    ]
    .iter()
    .map(|line| Record::from_line(line).unwrap())
    .collect()
}

/// Records shaped like real catalog rows, with sparse location columns
pub fn sample_records() -> Vec<Record> {
    [
        "Aachen\t1\tValid\tL5\t21\tFell\t1880\t50.775\t6.08333\t(50.775, 6.08333)\t\t",
        "Abajo\t4\tValid\tH5\t331\tFound\t1982\t26.8\t-105.41667\t(26.8, -105.41667)\t\t",
        "Acapulco\t10\tValid\tAcapulcoite\t1914\tFell\t1976\t16.88333\t-99.9\t(16.88333, -99.9)\t\t",
        "Northwest Africa 5815\t50693\tValid\tL5\t256.8\tFound\t\t0\t0\t(0.0, 0.0)\t\t",
    ]
    .iter()
    .map(|line| Record::from_line(line).unwrap())
    .collect()
}

pub fn as_refs(records: &[Record]) -> Vec<&Record> {
    records.iter().collect()
}
