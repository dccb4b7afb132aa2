//! JUnit XML report loading
//!
//! Parses `<testsuites>`/`<testsuite>`/`<testcase>` documents into the
//! report tree. Status mapping: `<failure>` tags a case failed, `<error>`
//! tags it aborted, `<skipped>` leaves it passed with the skip message kept
//! as a detail block. Aggregate container tags are computed here, once,
//! before the tree is handed to the filter engine.

use crate::error::{Error, Result};
use crate::report::{CaseNode, DetailBlock, Report, Status, SuiteNode};
use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Class name used when a testcase carries no classname attribute.
const NO_CLASSNAME: &str = "no-classname-set";

/// Text-bearing child of a testcase currently being read.
enum Block {
    Failure,
    Error,
    Skipped,
    Stdout,
    Stderr,
}

impl Block {
    fn from_element(name: &[u8]) -> Option<Block> {
        match name {
            b"failure" => Some(Block::Failure),
            b"error" => Some(Block::Error),
            b"skipped" => Some(Block::Skipped),
            b"system-out" => Some(Block::Stdout),
            b"system-err" => Some(Block::Stderr),
            _ => None,
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            Block::Failure => "failure",
            Block::Error => "error",
            Block::Skipped => "skipped",
            Block::Stdout => "stdout",
            Block::Stderr => "stderr",
        }
    }
}

/// Load a JUnit XML report from a file.
///
/// The report title is taken from the file stem.
pub fn load_file(path: &Path) -> Result<Report> {
    if !path.exists() {
        return Err(Error::ReportNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse(&contents, &title)
}

/// Parse a JUnit XML document into a report tree.
pub fn parse(xml: &str, title: &str) -> Result<Report> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut report = Report::new(title);
    let mut suite: Option<SuiteNode> = None;
    let mut case: Option<CaseNode> = None;
    let mut block: Option<(Block, Option<String>)> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(Error::Xml)? {
            Event::Start(e) => match e.name().as_ref() {
                b"testsuite" => {
                    if let Some(done) = suite.take() {
                        report.add_suite(finalize_suite(done));
                    }
                    suite = Some(start_suite(&e)?);
                }
                b"testcase" => {
                    if suite.is_none() {
                        return Err(Error::Parse("testcase outside of testsuite".to_string()));
                    }
                    case = Some(start_case(&e)?);
                }
                name => {
                    if case.is_some() {
                        if let Some(kind) = Block::from_element(name) {
                            let message = attr_value(&e, b"message")?;
                            block = Some((kind, message));
                            text.clear();
                        }
                    }
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"testcase" => {
                    let Some(owner) = suite.as_mut() else {
                        return Err(Error::Parse("testcase outside of testsuite".to_string()));
                    };
                    let done = start_case(&e)?;
                    attach_case(owner, done);
                }
                b"property" => {
                    if let Some(current) = case.as_mut() {
                        let name = attr_value(&e, b"name")?.unwrap_or_default();
                        let value = attr_value(&e, b"value")?.unwrap_or_default();
                        current
                            .details
                            .push(DetailBlock::new("property", format!("{}: {}", name, value)));
                    }
                }
                name => {
                    if let Some(current) = case.as_mut() {
                        if let Some(kind) = Block::from_element(name) {
                            let message = attr_value(&e, b"message")?;
                            finish_block(current, kind, message, String::new());
                        }
                    }
                }
            },
            Event::Text(e) => {
                if block.is_some() {
                    text.push_str(&e.unescape().map_err(Error::Xml)?);
                }
            }
            Event::CData(e) => {
                if block.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"testcase" => {
                    if let (Some(owner), Some(done)) = (suite.as_mut(), case.take()) {
                        attach_case(owner, done);
                    }
                }
                b"testsuite" => {
                    if let Some(done) = suite.take() {
                        report.add_suite(finalize_suite(done));
                    }
                }
                name => {
                    if Block::from_element(name).is_some() {
                        if let (Some(current), Some((kind, message))) =
                            (case.as_mut(), block.take())
                        {
                            finish_block(current, kind, message, std::mem::take(&mut text));
                        }
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(done) = suite.take() {
        report.add_suite(finalize_suite(done));
    }

    Ok(report)
}

/// Build a suite node from a testsuite start tag.
fn start_suite(e: &BytesStart<'_>) -> Result<SuiteNode> {
    let name = attr_value(e, b"name")?.unwrap_or_else(|| "testsuite".to_string());
    let mut suite = SuiteNode::new(name);
    if let Some(stamp) = attr_value(e, b"timestamp")? {
        suite.timestamp = parse_timestamp(&stamp);
    }
    Ok(suite)
}

/// Build a case node from a testcase start tag. Status starts as passed
/// and is refined by failure/error children.
fn start_case(e: &BytesStart<'_>) -> Result<CaseNode> {
    let name = attr_value(e, b"name")?.unwrap_or_default();
    let classname = attr_value(e, b"classname")?
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| NO_CLASSNAME.to_string());

    let mut case = CaseNode::passed(name).with_classname(classname);
    if let Some(seconds) = attr_value(e, b"time")? {
        case.duration = parse_duration(&seconds);
    }
    Ok(case)
}

/// Record a completed failure/error/skipped/output block on a case.
fn finish_block(case: &mut CaseNode, kind: Block, message: Option<String>, body: String) {
    match kind {
        Block::Failure => {
            case.status = Status::Failed;
            case.message = message.clone();
        }
        // failure dominates when a case carries both
        Block::Error => {
            if !case.status.is_failed() {
                case.status = Status::Aborted;
                case.message = message.clone();
            }
        }
        Block::Skipped => {}
        Block::Stdout | Block::Stderr => {}
    }

    let text = if body.is_empty() {
        message.unwrap_or_default()
    } else {
        body
    };
    case.details.push(DetailBlock::new(kind.marker(), text));
}

/// File a case under its class, creating the class on first sight.
fn attach_case(suite: &mut SuiteNode, case: CaseNode) {
    let classname = case.classname.clone();
    suite.class_mut(&classname).add_case(case);
}

/// Assign aggregate status tags; the filter engine never recomputes them.
fn finalize_suite(mut suite: SuiteNode) -> SuiteNode {
    for class in suite.classes.values_mut() {
        class.status = class.aggregate_status();
    }
    suite.status = suite.aggregate_status();
    suite
}

/// Read one attribute value from a start tag.
fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(Error::Xml)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a testsuite timestamp attribute. JUnit emitters disagree on the
/// format, so both RFC 3339 and bare ISO 8601 are accepted; anything else
/// is dropped rather than failing the load.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(stamp.and_utc());
        }
    }
    None
}

/// Parse a testcase time attribute (seconds as a decimal).
fn parse_duration(value: &str) -> Option<Duration> {
    let seconds: f64 = value.parse().ok()?;
    if seconds.is_finite() && seconds >= 0.0 {
        Some(Duration::from_secs_f64(seconds))
    } else {
        None
    }
}
