//! Show failing tests from a report

use crate::commands::utils::load_report;
use crate::commands::Command;
use crate::error::Result;
use crate::filter::{FilterEngine, Segment};
use crate::report::Visibility;
use crate::ui::UI;

pub struct FailingCommand {
    report_path: String,
    list_only: bool,
}

impl FailingCommand {
    pub fn new(report_path: impl Into<String>) -> Self {
        FailingCommand {
            report_path: report_path.into(),
            list_only: false,
        }
    }

    pub fn with_list_only(report_path: impl Into<String>) -> Self {
        FailingCommand {
            report_path: report_path.into(),
            list_only: true,
        }
    }
}

impl Command for FailingCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let (mut report, _config) = load_report(&self.report_path)?;

        // the failing segment's visible outcomes are exactly the failures
        let mut engine = FilterEngine::new();
        engine.select(&mut report, Segment::Failing);

        let failing: Vec<String> = report
            .cases()
            .filter(|case| case.is_visible())
            .map(|case| format!("{}.{}", case.classname, case.name))
            .collect();

        if failing.is_empty() {
            if !self.list_only {
                ui.output("No failing tests")?;
            }
            Ok(0)
        } else {
            if self.list_only {
                // List mode: just output test IDs, one per line
                for test_id in failing {
                    ui.output(&test_id)?;
                }
            } else {
                ui.output(&format!("{} failing test(s):", failing.len()))?;
                for test_id in failing {
                    ui.output(&format!("  {}", test_id))?;
                }
            }
            Ok(1)
        }
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn help(&self) -> &str {
        "Show tests that failed in the report"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_ui::TestUI;
    use std::fs;
    use tempfile::TempDir;

    fn write_report(temp: &TempDir, xml: &str) -> String {
        let path = temp.path().join("results.xml");
        fs::write(&path, xml).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_failing_command_no_failures() {
        let temp = TempDir::new().unwrap();
        let path = write_report(
            &temp,
            r#"<testsuite name="s"><testcase classname="c" name="test_ok"/></testsuite>"#,
        );

        let mut ui = TestUI::new();
        let cmd = FailingCommand::new(path);
        let result = cmd.execute(&mut ui);

        assert_eq!(result.unwrap(), 0);
        assert!(ui.output.iter().any(|s| s.contains("No failing tests")));
    }

    #[test]
    fn test_failing_command_with_failures() {
        let temp = TempDir::new().unwrap();
        let path = write_report(
            &temp,
            r#"<testsuite name="s">
                 <testcase classname="tests.Bad" name="test_one"><failure message="a"/></testcase>
                 <testcase classname="tests.Bad" name="test_two"><failure message="b"/></testcase>
                 <testcase classname="tests.Good" name="test_ok"/>
               </testsuite>"#,
        );

        let mut ui = TestUI::new();
        let cmd = FailingCommand::new(path);
        let result = cmd.execute(&mut ui);

        assert_eq!(result.unwrap(), 1);
        assert!(ui.output.iter().any(|s| s.contains("2 failing")));
        assert!(ui.output.iter().any(|s| s.contains("tests.Bad.test_one")));
        assert!(ui.output.iter().any(|s| s.contains("tests.Bad.test_two")));
        assert!(!ui.output.iter().any(|s| s.contains("test_ok")));
    }

    #[test]
    fn test_failing_command_list_mode() {
        let temp = TempDir::new().unwrap();
        let path = write_report(
            &temp,
            r#"<testsuite name="s">
                 <testcase classname="tests.Bad" name="test_one"><failure message="a"/></testcase>
               </testsuite>"#,
        );

        let mut ui = TestUI::new();
        let cmd = FailingCommand::with_list_only(path);
        let result = cmd.execute(&mut ui);

        assert_eq!(result.unwrap(), 1);
        // In list mode, output should be just test IDs, no header
        assert_eq!(ui.output, vec!["tests.Bad.test_one".to_string()]);
    }

    #[test]
    fn test_failing_command_excludes_aborted() {
        let temp = TempDir::new().unwrap();
        let path = write_report(
            &temp,
            r#"<testsuite name="s">
                 <testcase classname="tests.Bad" name="test_err"><error message="a"/></testcase>
               </testsuite>"#,
        );

        let mut ui = TestUI::new();
        let cmd = FailingCommand::new(path);
        let result = cmd.execute(&mut ui);

        assert_eq!(result.unwrap(), 0);
        assert!(ui.output.iter().any(|s| s.contains("No failing tests")));
    }
}
