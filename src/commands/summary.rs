//! Show summary counts for a report

use crate::commands::utils::load_report;
use crate::commands::Command;
use crate::error::Result;
use crate::report::Status;
use crate::ui::UI;

pub struct SummaryCommand {
    report_path: String,
}

impl SummaryCommand {
    pub fn new(report_path: impl Into<String>) -> Self {
        SummaryCommand {
            report_path: report_path.into(),
        }
    }
}

impl Command for SummaryCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let (report, _config) = load_report(&self.report_path)?;

        let classes: usize = report.suites.iter().map(|s| s.classes.len()).sum();

        ui.output("Report Summary:")?;
        ui.output(&format!("  Title: {}", report.title))?;
        ui.output(&format!("  Suites: {}", report.suites.len()))?;
        ui.output(&format!("  Classes: {}", classes))?;
        ui.output(&format!("  Total tests: {}", report.total_cases()))?;
        ui.output(&format!(
            "  Passed: {}",
            report.count_status(Status::Passed)
        ))?;
        ui.output(&format!(
            "  Failed: {}",
            report.count_status(Status::Failed)
        ))?;
        ui.output(&format!(
            "  Aborted: {}",
            report.count_status(Status::Aborted)
        ))?;

        Ok(0)
    }

    fn name(&self) -> &str {
        "summary"
    }

    fn help(&self) -> &str {
        "Show per-status counts for the report"
    }
}
