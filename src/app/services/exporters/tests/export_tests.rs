//! Tests for sink dispatch through `export_at`

use super::*;
use crate::app::services::exporters::{ExportReport, OutputSink, export_at};
use crate::config::Config;
use chrono::{NaiveDate, NaiveDateTime};

fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_micro_opt(8, 15, 0, 42)
        .unwrap()
}

#[test]
fn test_console_export_writes_to_console_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_output_dir(dir.path());
    let records = scenario_records();
    let mut console = Vec::new();

    let report = export_at(
        OutputSink::Console,
        &as_refs(&records),
        &config,
        &mut console,
        fixed_timestamp(),
    )
    .unwrap();

    assert_eq!(
        report,
        ExportReport {
            sink: OutputSink::Console,
            rows_written: 2,
            destination: None,
        }
    );
    assert!(!console.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_text_export_uses_timestamp_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_output_dir(dir.path());
    let records = scenario_records();
    let mut console = Vec::new();

    let report = export_at(
        OutputSink::Text,
        &as_refs(&records),
        &config,
        &mut console,
        fixed_timestamp(),
    )
    .unwrap();

    let expected = dir.path().join("2024-02-29_08_15_00_000042.txt");
    assert_eq!(report.destination.as_deref(), Some(expected.as_path()));
    assert_eq!(report.rows_written, 2);
    assert!(console.is_empty());

    let content = std::fs::read_to_string(&expected).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_spreadsheet_export_creates_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("exports");
    let config = Config::default().with_output_dir(&output_dir);
    let records = sample_records();

    let report = export_at(
        OutputSink::Spreadsheet,
        &as_refs(&records),
        &config,
        &mut Vec::new(),
        fixed_timestamp(),
    )
    .unwrap();

    let expected = output_dir.join("2024-02-29_08_15_00_000042.xlsx");
    assert_eq!(report.destination, Some(expected.clone()));
    assert!(expected.exists());
}

#[test]
fn test_output_sink_from_str() {
    assert_eq!("console".parse::<OutputSink>().unwrap(), OutputSink::Console);
    assert_eq!("Text".parse::<OutputSink>().unwrap(), OutputSink::Text);
    assert_eq!(
        "spreadsheet".parse::<OutputSink>().unwrap(),
        OutputSink::Spreadsheet
    );
    assert!("excel".parse::<OutputSink>().is_err());
}
