//! Terminal rendering of the report tree
//!
//! Prints the currently-visible projection of a report: nodes hidden by the
//! segment filter are skipped, collapsed case bodies stay collapsed, and
//! hidden detail blocks are left out. Output flows through the UI trait.

use crate::error::Result;
use crate::report::{CaseNode, Report, Status, Visibility};
use crate::ui::UI;
use console::Style;

/// Renders the visible projection of a report as indented text.
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    /// Renderer with status colors for terminal use.
    pub fn new() -> Self {
        TextRenderer { color: true }
    }

    /// Renderer without any styling, for piped output and tests.
    pub fn plain() -> Self {
        TextRenderer { color: false }
    }

    /// Render every visible node of the report.
    pub fn render(&self, report: &Report, ui: &mut dyn UI) -> Result<()> {
        ui.output(&format!("Report: {}", report.title))?;

        for suite in report.suites.iter().filter(|s| s.is_visible()) {
            ui.output("")?;
            ui.output(&format!(
                "Suite: {} [{}]",
                suite.name,
                self.paint(suite.status)
            ))?;
            if let Some(timestamp) = suite.timestamp {
                ui.output(&format!("  Started: {}", timestamp))?;
            }

            for class in suite.classes.values().filter(|c| c.is_visible()) {
                ui.output(&format!("  {} [{}]", class.name, self.paint(class.status)))?;
                for case in class.cases.iter().filter(|c| c.is_visible()) {
                    self.render_case(case, ui)?;
                }
            }
        }

        let visible = report.cases().filter(|c| c.is_visible()).count();
        ui.output("")?;
        ui.output(&format!("Shown: {} of {} tests", visible, report.total_cases()))?;
        Ok(())
    }

    fn render_case(&self, case: &CaseNode, ui: &mut dyn UI) -> Result<()> {
        let duration = match case.duration {
            Some(d) => format!(" ({:.3}s)", d.as_secs_f64()),
            None => String::new(),
        };
        let message = match &case.message {
            Some(m) => format!(": {}", m),
            None => String::new(),
        };
        ui.output(&format!(
            "    {}{} ... {}{}",
            case.name,
            duration,
            self.paint(case.status),
            message
        ))?;

        if !case.body_visible {
            return Ok(());
        }
        for detail in case.details.iter().filter(|d| d.is_visible()) {
            ui.output(&format!("      {}:", detail.marker))?;
            for line in detail.text.lines() {
                ui.output(&format!("        {}", line))?;
            }
        }
        Ok(())
    }

    fn paint(&self, status: Status) -> String {
        if !self.color {
            return status.to_string();
        }
        let style = match status {
            Status::Passed => Style::new().green(),
            Status::Failed => Style::new().red(),
            Status::Aborted => Style::new().yellow(),
        };
        style.apply_to(status).to_string()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
