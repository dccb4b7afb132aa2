//! Shared helpers for commands

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::filter::Segment;
use crate::junit;
use crate::report::Report;
use std::path::Path;

/// Load a report file together with the configuration found next to it.
///
/// A `report_title` from the configuration overrides the file-derived one.
pub(crate) fn load_report(report_path: &str) -> Result<(Report, ReportConfig)> {
    let path = Path::new(report_path);
    let mut report = junit::load_file(path)?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let config = ReportConfig::load(dir.unwrap_or_else(|| Path::new(".")))?;
    if let Some(title) = &config.report_title {
        report.title = title.clone();
    }

    Ok((report, config))
}

/// Resolve the segment to apply: command-line choice first, then the
/// configured default. Unknown names are an error at this boundary; the
/// silent no-op rule covers only engine control identifiers.
pub(crate) fn resolve_segment(requested: Option<&str>, config: &ReportConfig) -> Result<Segment> {
    match requested {
        Some(name) => {
            Segment::from_name(name).ok_or_else(|| Error::Other(format!("Unknown segment: {}", name)))
        }
        None => Ok(config.default_segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_segment_prefers_request() {
        let config = ReportConfig {
            default_segment: Segment::Failing,
            ..ReportConfig::default()
        };
        assert_eq!(
            resolve_segment(Some("passing"), &config).unwrap(),
            Segment::Passing
        );
        assert_eq!(resolve_segment(None, &config).unwrap(), Segment::Failing);
    }

    #[test]
    fn test_resolve_segment_rejects_unknown() {
        let config = ReportConfig::default();
        assert!(resolve_segment(Some("broken"), &config).is_err());
    }
}
