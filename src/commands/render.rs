//! Write a filtered report as a static HTML page

use crate::commands::utils::{load_report, resolve_segment};
use crate::commands::Command;
use crate::error::Result;
use crate::filter::{toggle_details, FilterEngine};
use crate::html::HtmlRenderer;
use crate::ui::UI;
use std::fs;

pub struct RenderCommand {
    report_path: String,
    output_path: String,
    segment: Option<String>,
}

impl RenderCommand {
    pub fn new(report_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        RenderCommand {
            report_path: report_path.into(),
            output_path: output_path.into(),
            segment: None,
        }
    }

    pub fn with_segment(mut self, segment: Option<String>) -> Self {
        self.segment = segment;
        self
    }
}

impl Command for RenderCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let (mut report, config) = load_report(&self.report_path)?;
        let segment = resolve_segment(self.segment.as_deref(), &config)?;

        let mut engine = FilterEngine::new();
        engine.select(&mut report, segment);
        for marker in &config.collapse_details {
            toggle_details(&mut report, marker);
        }

        let html = HtmlRenderer.render(&report, &engine);
        fs::write(&self.output_path, html)?;

        ui.output(&format!("Wrote {}", self.output_path))?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "render"
    }

    fn help(&self) -> &str {
        "Write the filtered report as a static HTML page"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_ui::TestUI;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<testsuite name="s">
  <testcase classname="tests.Good" name="test_ok"/>
  <testcase classname="tests.Bad" name="test_bad"><failure message="boom"/></testcase>
</testsuite>"#;

    #[test]
    fn test_render_writes_html_file() {
        let temp = TempDir::new().unwrap();
        let report_path = temp.path().join("results.xml");
        let output_path = temp.path().join("report.html");
        fs::write(&report_path, SAMPLE).unwrap();

        let mut ui = TestUI::new();
        let cmd = RenderCommand::new(
            report_path.to_string_lossy().to_string(),
            output_path.to_string_lossy().to_string(),
        );
        let result = cmd.execute(&mut ui);

        assert_eq!(result.unwrap(), 0);
        assert!(ui.output[0].starts_with("Wrote "));

        let html = fs::read_to_string(&output_path).unwrap();
        assert!(html.contains("outcome outcome-failed"));
        assert!(html.contains("id=\"segment-bar\""));
    }

    #[test]
    fn test_render_with_segment_hides_non_matching() {
        let temp = TempDir::new().unwrap();
        let report_path = temp.path().join("results.xml");
        let output_path = temp.path().join("report.html");
        fs::write(&report_path, SAMPLE).unwrap();

        let mut ui = TestUI::new();
        let cmd = RenderCommand::new(
            report_path.to_string_lossy().to_string(),
            output_path.to_string_lossy().to_string(),
        )
        .with_segment(Some("failing".to_string()));
        cmd.execute(&mut ui).unwrap();

        let html = fs::read_to_string(&output_path).unwrap();
        assert!(html.contains("class=\"outcome outcome-passed\" style=\"display:none\""));
        assert!(html.contains("class=\"segment selected\">failing"));
    }
}
