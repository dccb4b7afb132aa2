//! Show a filtered view of a report in the terminal

use crate::commands::utils::{load_report, resolve_segment};
use crate::commands::Command;
use crate::error::Result;
use crate::filter::{toggle_details, FilterEngine};
use crate::render::TextRenderer;
use crate::report::Status;
use crate::ui::UI;

pub struct ShowCommand {
    report_path: String,
    segment: Option<String>,
    collapse: Vec<String>,
}

impl ShowCommand {
    pub fn new(report_path: impl Into<String>) -> Self {
        ShowCommand {
            report_path: report_path.into(),
            segment: None,
            collapse: Vec::new(),
        }
    }

    pub fn with_segment(mut self, segment: Option<String>) -> Self {
        self.segment = segment;
        self
    }

    pub fn with_collapse(mut self, collapse: Vec<String>) -> Self {
        self.collapse = collapse;
        self
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let (mut report, config) = load_report(&self.report_path)?;
        let segment = resolve_segment(self.segment.as_deref(), &config)?;

        let mut engine = FilterEngine::new();
        engine.select(&mut report, segment);

        // markers start visible, so one flip collapses them
        for marker in config.collapse_details.iter().chain(&self.collapse) {
            toggle_details(&mut report, marker);
        }

        TextRenderer::new().render(&report, ui)?;

        if report.count_status(Status::Failed) > 0 {
            Ok(1)
        } else {
            Ok(0)
        }
    }

    fn name(&self) -> &str {
        "show"
    }

    fn help(&self) -> &str {
        "Show a report with a segment filter applied"
    }
}
