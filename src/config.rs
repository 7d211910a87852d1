//! Configuration management and validation.
//!
//! Provides the run configuration for exports and catalog loading, layered
//! from defaults, environment variables and command-line overrides.

use crate::app::services::catalog_loader::ParseErrorPolicy;
use crate::constants::{
    DEFAULT_COLUMN_WIDTH, DEFAULT_SHEET_NAME, INVALID_SHEET_NAME_CHARS, MAX_COLUMN_WIDTH,
    MAX_SHEET_NAME_LEN, env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Settings shared by the loader and the exporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that receives text and spreadsheet exports
    pub output_dir: PathBuf,

    /// Width of each console table column in characters
    pub column_width: usize,

    /// Worksheet name for spreadsheet exports
    pub sheet_name: String,

    /// Handling of catalog lines with malformed mass or year
    pub parse_error_policy: ParseErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            column_width: DEFAULT_COLUMN_WIDTH,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            parse_error_policy: ParseErrorPolicy::Abort,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values found through `lookup`, keyed by environment variable name
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(env_vars::OUTPUT_DIR) {
            debug!("{} overrides output directory: {}", env_vars::OUTPUT_DIR, dir);
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(width) = lookup(env_vars::COLUMN_WIDTH) {
            self.column_width = width.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    env_vars::COLUMN_WIDTH,
                    width
                ))
            })?;
        }

        if let Some(name) = lookup(env_vars::SHEET_NAME) {
            self.sheet_name = name;
        }

        Ok(())
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_column_width(mut self, column_width: usize) -> Self {
        self.column_width = column_width;
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_parse_error_policy(mut self, policy: ParseErrorPolicy) -> Self {
        self.parse_error_policy = policy;
        self
    }

    /// Check values that would otherwise fail late, at export time
    pub fn validate(&self) -> Result<()> {
        if self.column_width == 0 || self.column_width > MAX_COLUMN_WIDTH {
            return Err(Error::configuration(format!(
                "Column width must be between 1 and {}, got {}",
                MAX_COLUMN_WIDTH, self.column_width
            )));
        }

        if self.sheet_name.trim().is_empty() {
            return Err(Error::configuration("Sheet name cannot be empty"));
        }

        if self.sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::configuration(format!(
                "Sheet name '{}' exceeds {} characters",
                self.sheet_name, MAX_SHEET_NAME_LEN
            )));
        }

        if let Some(c) = self
            .sheet_name
            .chars()
            .find(|c| INVALID_SHEET_NAME_CHARS.contains(c))
        {
            return Err(Error::configuration(format!(
                "Sheet name '{}' contains invalid character '{}'",
                self.sheet_name, c
            )));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }

        Ok(())
    }

    /// Create the output directory if it does not exist
    pub fn ensure_output_directory(&self) -> Result<()> {
        if !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir).map_err(|e| {
                Error::io(
                    format!(
                        "Failed to create output directory '{}'",
                        self.output_dir.display()
                    ),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.column_width, 30);
        assert_eq!(config.sheet_name, "filteredMeteoriteData");
        assert_eq!(config.parse_error_policy, ParseErrorPolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(lookup_from(&[
                (env_vars::OUTPUT_DIR, "/tmp/exports"),
                (env_vars::COLUMN_WIDTH, " 12 "),
                (env_vars::SHEET_NAME, "landings"),
            ]))
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.column_width, 12);
        assert_eq!(config.sheet_name, "landings");
    }

    #[test]
    fn test_env_override_rejects_bad_width() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(lookup_from(&[(env_vars::COLUMN_WIDTH, "wide")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_validate_column_width() {
        assert!(Config::default().with_column_width(0).validate().is_err());
        assert!(Config::default().with_column_width(201).validate().is_err());
        assert!(Config::default().with_column_width(1).validate().is_ok());
    }

    #[test]
    fn test_validate_sheet_name() {
        assert!(Config::default().with_sheet_name("").validate().is_err());
        assert!(Config::default().with_sheet_name("a/b").validate().is_err());
        assert!(Config::default().with_sheet_name("x".repeat(32)).validate().is_err());
        assert!(Config::default().with_sheet_name("x".repeat(31)).validate().is_ok());
    }

    #[test]
    fn test_validate_output_dir_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::default().with_output_dir(file.path());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ensure_output_directory_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let config = Config::default().with_output_dir(&nested);

        config.ensure_output_directory().unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn test_builder_sets_policy() {
        let config = Config::default().with_parse_error_policy(ParseErrorPolicy::Skip);
        assert_eq!(config.parse_error_policy, ParseErrorPolicy::Skip);
    }
}
