//! Test report document tree
//!
//! The tree mirrors the structure of a rendered report: suites contain test
//! classes, classes contain case outcomes, and cases carry detail blocks
//! (stdout, stderr, failure text, properties). Every node has an explicit
//! visibility flag which the filter engine projects onto; status tags are
//! assigned once when the tree is built and never change afterwards.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::fmt;
use std::time::Duration;

/// Status tag of a single node: its own result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Test passed (includes skipped tests, which keep their skip message
    /// as a detail block).
    Passed,
    /// Test failed with an assertion or expectation error.
    Failed,
    /// Test run was aborted by an unexpected error.
    Aborted,
}

impl Status {
    /// Returns true if this status represents a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed)
    }

    /// Returns true if this status represents an aborted run.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Status::Aborted)
    }

    /// Returns true if this status represents a pass.
    pub fn is_passed(&self) -> bool {
        matches!(self, Status::Passed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Passed => write!(f, "passed"),
            Status::Failed => write!(f, "failed"),
            Status::Aborted => write!(f, "aborted"),
        }
    }
}

/// Visibility flag shared by every node in the report tree.
///
/// These are the primitive operations the filter engine is built from. All
/// of them are total; none can fail.
pub trait Visibility {
    /// Returns the current visibility flag.
    fn is_visible(&self) -> bool;

    /// Sets the visibility flag.
    fn set_visible(&mut self, visible: bool);

    /// Marks the node visible.
    fn show(&mut self) {
        self.set_visible(true);
    }

    /// Marks the node hidden.
    fn hide(&mut self) {
        self.set_visible(false);
    }

    /// Returns true if the node is hidden.
    fn is_hidden(&self) -> bool {
        !self.is_visible()
    }

    /// Inverts the current visibility flag.
    fn toggle(&mut self) {
        let hidden = self.is_hidden();
        self.set_visible(hidden);
    }
}

/// A named block of auxiliary output attached to a test case.
///
/// The marker identifies the kind of block (`stdout`, `stderr`, `failure`,
/// `skipped`, `property`) and is the handle grouped toggling operates on.
#[derive(Debug, Clone)]
pub struct DetailBlock {
    /// Marker class identifying the kind of block.
    pub marker: String,
    /// Text content of the block.
    pub text: String,
    /// Whether the block is currently shown.
    pub visible: bool,
}

impl DetailBlock {
    /// Creates a visible detail block.
    pub fn new(marker: impl Into<String>, text: impl Into<String>) -> Self {
        DetailBlock {
            marker: marker.into(),
            text: text.into(),
            visible: true,
        }
    }
}

impl Visibility for DetailBlock {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A single test case outcome, the leaf of the hierarchy.
#[derive(Debug, Clone)]
pub struct CaseNode {
    /// Test name.
    pub name: String,
    /// Name of the class the case belongs to.
    pub classname: String,
    /// Own result category.
    pub status: Status,
    /// Time taken to execute the test, if reported.
    pub duration: Option<Duration>,
    /// Brief failure or abort message, if any.
    pub message: Option<String>,
    /// Whether the row is shown under the active segment filter.
    pub visible: bool,
    /// Whether the row's detail body (the block following the heading) is
    /// expanded. Independent of the segment filter.
    pub body_visible: bool,
    /// Auxiliary output blocks.
    pub details: Vec<DetailBlock>,
}

impl CaseNode {
    /// Create a passed case
    pub fn passed(name: impl Into<String>) -> Self {
        CaseNode {
            name: name.into(),
            classname: String::new(),
            status: Status::Passed,
            duration: None,
            message: None,
            visible: true,
            body_visible: true,
            details: Vec::new(),
        }
    }

    /// Create a failed case
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        CaseNode {
            status: Status::Failed,
            message: Some(message.into()),
            ..CaseNode::passed(name)
        }
    }

    /// Create an aborted case
    pub fn aborted(name: impl Into<String>, message: impl Into<String>) -> Self {
        CaseNode {
            status: Status::Aborted,
            message: Some(message.into()),
            ..CaseNode::passed(name)
        }
    }

    /// Set the owning class name
    pub fn with_classname(mut self, classname: impl Into<String>) -> Self {
        self.classname = classname.into();
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Attach a detail block
    pub fn with_detail(mut self, marker: impl Into<String>, text: impl Into<String>) -> Self {
        self.details.push(DetailBlock::new(marker, text));
        self
    }
}

impl Visibility for CaseNode {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A test class: the container of case outcomes for one class name.
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// Class name.
    pub name: String,
    /// Aggregate status tag, assigned when the tree is built.
    pub status: Status,
    /// Whether the container is shown under the active segment filter.
    pub visible: bool,
    /// Case outcomes in report order.
    pub cases: Vec<CaseNode>,
}

impl ClassNode {
    /// Creates an empty class tagged as passed.
    pub fn new(name: impl Into<String>) -> Self {
        ClassNode {
            name: name.into(),
            status: Status::Passed,
            visible: true,
            cases: Vec::new(),
        }
    }

    /// Appends a case outcome to this class.
    pub fn add_case(&mut self, case: CaseNode) {
        self.cases.push(case);
    }

    /// Returns true if any outcome in this class carries the given status.
    pub fn contains_outcome(&self, status: Status) -> bool {
        self.cases.iter().any(|case| case.status == status)
    }

    /// Compute the aggregate status from the outcomes beneath this class.
    ///
    /// Failure dominates abort, abort dominates pass. Callers assign the
    /// result to `status` when building the tree; the filter engine never
    /// recomputes tags.
    pub fn aggregate_status(&self) -> Status {
        if self.contains_outcome(Status::Failed) {
            Status::Failed
        } else if self.contains_outcome(Status::Aborted) {
            Status::Aborted
        } else {
            Status::Passed
        }
    }
}

impl Visibility for ClassNode {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A test suite: the container of test classes for one suite element.
#[derive(Debug, Clone)]
pub struct SuiteNode {
    /// Suite name.
    pub name: String,
    /// Aggregate status tag, assigned when the tree is built.
    pub status: Status,
    /// When the suite ran, if the report says.
    pub timestamp: Option<DateTime<Utc>>,
    /// Whether the container is shown under the active segment filter.
    pub visible: bool,
    /// Classes keyed by class name, in first-seen order.
    pub classes: IndexMap<String, ClassNode>,
}

impl SuiteNode {
    /// Creates an empty suite tagged as passed.
    pub fn new(name: impl Into<String>) -> Self {
        SuiteNode {
            name: name.into(),
            status: Status::Passed,
            timestamp: None,
            visible: true,
            classes: IndexMap::new(),
        }
    }

    /// Returns the class with the given name, creating it if absent.
    pub fn class_mut(&mut self, name: &str) -> &mut ClassNode {
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| ClassNode::new(name))
    }

    /// Returns true if any outcome anywhere beneath this suite carries the
    /// given status.
    pub fn contains_outcome(&self, status: Status) -> bool {
        self.classes
            .values()
            .any(|class| class.contains_outcome(status))
    }

    /// Compute the aggregate status from all outcomes beneath this suite.
    pub fn aggregate_status(&self) -> Status {
        if self.contains_outcome(Status::Failed) {
            Status::Failed
        } else if self.contains_outcome(Status::Aborted) {
            Status::Aborted
        } else {
            Status::Passed
        }
    }

    /// Total number of case outcomes in this suite.
    pub fn total_cases(&self) -> usize {
        self.classes.values().map(|class| class.cases.len()).sum()
    }
}

impl Visibility for SuiteNode {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A complete report document: the tree the filter engine projects onto.
///
/// A freshly built report has every node visible and every case body
/// expanded.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Report title shown in rendered output.
    pub title: String,
    /// Suites in report order.
    pub suites: Vec<SuiteNode>,
}

impl Report {
    /// Creates an empty report with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Report {
            title: title.into(),
            suites: Vec::new(),
        }
    }

    /// Appends a suite to the report.
    pub fn add_suite(&mut self, suite: SuiteNode) {
        self.suites.push(suite);
    }

    /// Iterate over every case outcome in the report.
    pub fn cases(&self) -> impl Iterator<Item = &CaseNode> {
        self.suites
            .iter()
            .flat_map(|suite| suite.classes.values())
            .flat_map(|class| class.cases.iter())
    }

    /// Total number of case outcomes.
    pub fn total_cases(&self) -> usize {
        self.cases().count()
    }

    /// Number of case outcomes with the given status.
    pub fn count_status(&self, status: Status) -> usize {
        self.cases().filter(|case| case.status == status).count()
    }

    /// Returns every case outcome that failed.
    pub fn failing_cases(&self) -> Vec<&CaseNode> {
        self.cases().filter(|case| case.status.is_failed()).collect()
    }
}
