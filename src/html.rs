//! Static HTML rendering of the report tree
//!
//! Emits a standalone document carrying the report's class vocabulary:
//! `testsuite` / `testclass` / `outcome` marker classes, their
//! `-passed` / `-failed` / `-aborted` status tags, and a segment bar whose
//! active control is marked `selected`. Visibility is computed ahead of
//! time by the filter engine and baked into the markup as inline display
//! styles, so the page needs no script.

use crate::filter::{FilterEngine, Segment};
use crate::report::{CaseNode, ClassNode, Report, Status, SuiteNode, Visibility};
use std::fmt::Write;

const SEGMENTS: [Segment; 4] = [
    Segment::All,
    Segment::Failing,
    Segment::Passing,
    Segment::Aborting,
];

const STYLESHEET: &str = "\
body { font-family: sans-serif; margin: 1em; }\n\
#segment-bar a { padding: 0.3em 0.8em; border: 1px solid #999; margin-right: 0.3em; }\n\
#segment-bar a.selected { background: #444; color: #fff; }\n\
.testsuite { border: 1px solid #ccc; margin: 1em 0; padding: 0.5em; }\n\
.testclass { margin: 0.5em 0 0.5em 1em; }\n\
.outcome { margin: 0.3em 0 0.3em 1em; padding: 0.2em; }\n\
.outcome-passed { background: #e6ffe6; }\n\
.outcome-failed { background: #ffe6e6; }\n\
.outcome-aborted { background: #fff5cc; }\n\
pre { margin: 0.2em 0; }\n";

/// Renders a filtered report as a standalone HTML page.
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Render the whole document. The engine supplies the segment marked
    /// as selected in the segment bar.
    pub fn render(&self, report: &Report, engine: &FilterEngine) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
             <title>{title}</title>\n<style>\n{css}</style>\n</head>\n<body>\n\
             <h1>{title}</h1>\n",
            title = escape(&report.title),
            css = STYLESHEET
        );

        self.render_segment_bar(&mut out, engine);
        for suite in &report.suites {
            self.render_suite(&mut out, suite);
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn render_segment_bar(&self, out: &mut String, engine: &FilterEngine) {
        out.push_str("<div id=\"segment-bar\">\n");
        for segment in SEGMENTS {
            let marker = if engine.is_selected(segment) {
                " selected"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "<a id=\"{id}\" class=\"segment{marker}\">{label}</a>",
                id = segment.control_id(),
                marker = marker,
                label = segment.name()
            );
        }
        out.push_str("</div>\n");
    }

    fn render_suite(&self, out: &mut String, suite: &SuiteNode) {
        let _ = writeln!(
            out,
            "<div class=\"testsuite testsuite-{status}\"{display}>",
            status = suite.status,
            display = display_attr(suite)
        );
        let _ = writeln!(out, "<div>Test Suite: {}</div>", escape(&suite.name));
        if let Some(timestamp) = suite.timestamp {
            let _ = writeln!(out, "<div class=\"timestamp\">{}</div>", timestamp);
        }

        out.push_str("<div class=\"testclasses\">\n");
        for class in suite.classes.values() {
            self.render_class(out, class);
        }
        out.push_str("</div>\n</div>\n");
    }

    fn render_class(&self, out: &mut String, class: &ClassNode) {
        let _ = writeln!(
            out,
            "<div class=\"testclass testclass-{status}\"{display}>",
            status = class.status,
            display = display_attr(class)
        );
        let _ = writeln!(out, "<div>Test Class: {}</div>", escape(&class.name));

        out.push_str("<div class=\"testcases\">\n");
        for case in &class.cases {
            self.render_case(out, case);
        }
        out.push_str("</div>\n</div>\n");
    }

    fn render_case(&self, out: &mut String, case: &CaseNode) {
        let _ = writeln!(
            out,
            "<div class=\"outcome outcome-{status}\"{display}>",
            status = case.status,
            display = display_attr(case)
        );

        let duration = match case.duration {
            Some(d) => format!(" <span class=\"duration\">{:.3}s</span>", d.as_secs_f64()),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "<div class=\"heading\"><span class=\"testname\"><b>{}</b></span>{}</div>",
            escape(&case.name),
            duration
        );

        let body_display = if case.body_visible {
            ""
        } else {
            " style=\"display:none\""
        };
        let _ = writeln!(out, "<div class=\"casebody\"{}>", body_display);
        if let Some(message) = &case.message {
            let _ = writeln!(
                out,
                "<div class=\"message\"><b>{}: {}</b></div>",
                capitalized(case.status),
                escape(message)
            );
        }
        for detail in &case.details {
            let _ = writeln!(
                out,
                "<div class=\"{marker}\"{display}><i>{marker}</i><br/>\n<pre>{text}</pre></div>",
                marker = escape(&detail.marker),
                display = if detail.visible {
                    ""
                } else {
                    " style=\"display:none\""
                },
                text = escape(&detail.text)
            );
        }
        out.push_str("</div>\n</div>\n");
    }
}

/// Inline display attribute for nodes the filter has hidden.
fn display_attr<T: Visibility>(node: &T) -> &'static str {
    if node.is_visible() {
        ""
    } else {
        " style=\"display:none\""
    }
}

fn capitalized(status: Status) -> &'static str {
    match status {
        Status::Passed => "Passed",
        Status::Failed => "Failed",
        Status::Aborted => "Aborted",
    }
}

/// Minimal HTML escaping for text and attribute content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
