//! Configuration file (.junitreport.conf) parsing and handling
//!
//! The .junitreport.conf file uses INI format with a [DEFAULT] section
//! holding viewer defaults. The file is optional; every key has a built-in
//! fallback.

use crate::error::{Error, Result};
use crate::filter::Segment;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up next to the report.
pub const CONFIG_FILE: &str = ".junitreport.conf";

/// Configuration loaded from .junitreport.conf
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Segment selected when none is given on the command line
    pub default_segment: Segment,

    /// Title overriding the one derived from the report file name
    pub report_title: Option<String>,

    /// Detail markers collapsed before rendering (e.g. "stdout,stderr")
    pub collapse_details: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            default_segment: Segment::All,
            report_title: None,
            collapse_details: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from the given directory.
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// a configuration error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(ReportConfig::default());
        }
        Self::load_from_file(&path)
    }

    /// Load configuration from a .junitreport.conf file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", CONFIG_FILE, e)))?;

        Self::parse(&contents)
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let mut ini: HashMap<String, RawSection> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;

        let raw = ini
            .remove("DEFAULT")
            .ok_or_else(|| Error::Config(format!("No [DEFAULT] section in {}", CONFIG_FILE)))?;

        let default_segment = match raw.default_segment {
            Some(name) => Segment::from_name(&name)
                .ok_or_else(|| Error::Config(format!("Unknown default_segment: {}", name)))?,
            None => Segment::All,
        };

        let collapse_details = raw
            .collapse_details
            .map(|value| {
                value
                    .split(',')
                    .map(|marker| marker.trim().to_string())
                    .filter(|marker| !marker.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(ReportConfig {
            default_segment,
            report_title: raw.report_title,
            collapse_details,
        })
    }
}

/// One INI section as written in the file, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSection {
    default_segment: Option<String>,
    report_title: Option<String>,
    collapse_details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = "[DEFAULT]\n\
                        default_segment=failing\n\
                        report_title=Nightly CI\n\
                        collapse_details=stdout, stderr\n";

        let config = ReportConfig::parse(contents).unwrap();
        assert_eq!(config.default_segment, Segment::Failing);
        assert_eq!(config.report_title, Some("Nightly CI".to_string()));
        assert_eq!(config.collapse_details, vec!["stdout", "stderr"]);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = ReportConfig::parse("[DEFAULT]\nreport_title=Nightly\n").unwrap();
        assert_eq!(config.default_segment, Segment::All);
        assert_eq!(config.report_title, Some("Nightly".to_string()));
        assert!(config.collapse_details.is_empty());
    }

    #[test]
    fn test_parse_missing_default_section() {
        let result = ReportConfig::parse("[other]\nkey=value\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_unknown_segment() {
        let result = ReportConfig::parse("[DEFAULT]\ndefault_segment=broken\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ReportConfig::load(temp.path()).unwrap();
        assert_eq!(config.default_segment, Segment::All);
    }

    #[test]
    fn test_load_from_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[DEFAULT]\ndefault_segment=aborting\n",
        )
        .unwrap();

        let config = ReportConfig::load(temp.path()).unwrap();
        assert_eq!(config.default_segment, Segment::Aborting);
    }
}
