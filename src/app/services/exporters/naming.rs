//! Timestamped output file names

use crate::constants::FILE_STEM_REPLACED_CHARS;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// File stem for an export made at `timestamp`, e.g. `2023-12-01_14_03_05_000123`
pub fn timestamp_file_stem(timestamp: NaiveDateTime) -> String {
    sanitize_file_stem(&timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string())
}

/// Replace colons, periods and spaces with underscores
pub fn sanitize_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if FILE_STEM_REPLACED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

pub fn output_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", stem, extension))
}
