//! Segment filter engine
//!
//! Projects a named segment (all / failing / passing / aborting) onto the
//! report tree by recomputing every node's visibility flag. The selected
//! segment is the engine's only state; status tags are read, never written.
//!
//! Container visibility propagates: under the passing and aborting segments
//! a class or suite whose own tag does not match is still shown when its
//! subtree holds a matching outcome, so a container never disappears while
//! it still has a result the viewer asked to see. Under the failing segment
//! containers follow their own tag directly.

use crate::report::{CaseNode, Report, Status, Visibility};

/// A named filter mode over the outcome hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    /// Show everything.
    #[default]
    All,
    /// Show failed outcomes and failed containers.
    Failing,
    /// Show passed outcomes, plus containers holding at least one.
    Passing,
    /// Show aborted outcomes, plus containers holding at least one.
    Aborting,
}

impl Segment {
    /// Parse a segment control identifier.
    ///
    /// Returns `None` for anything outside the fixed control set; callers
    /// treat that as a no-op rather than an error.
    pub fn from_control_id(id: &str) -> Option<Segment> {
        match id {
            "all-segment" => Some(Segment::All),
            "failing-segment" => Some(Segment::Failing),
            "passing-segment" => Some(Segment::Passing),
            "aborting-segment" => Some(Segment::Aborting),
            _ => None,
        }
    }

    /// Parse a bare segment name as used on the command line and in
    /// configuration files. Control identifiers are accepted too.
    pub fn from_name(name: &str) -> Option<Segment> {
        match name {
            "all" => Some(Segment::All),
            "failing" => Some(Segment::Failing),
            "passing" => Some(Segment::Passing),
            "aborting" => Some(Segment::Aborting),
            other => Segment::from_control_id(other),
        }
    }

    /// The control identifier for this segment.
    pub fn control_id(&self) -> &'static str {
        match self {
            Segment::All => "all-segment",
            Segment::Failing => "failing-segment",
            Segment::Passing => "passing-segment",
            Segment::Aborting => "aborting-segment",
        }
    }

    /// The bare name for this segment.
    pub fn name(&self) -> &'static str {
        match self {
            Segment::All => "all",
            Segment::Failing => "failing",
            Segment::Passing => "passing",
            Segment::Aborting => "aborting",
        }
    }
}

/// The segment filter engine.
///
/// Holds the active selection; because it is a single enum field, at most
/// one segment is ever selected and switching segments is atomic. A new
/// engine starts on [`Segment::All`], matching a freshly built report where
/// every node is visible.
///
/// # Examples
///
/// ```
/// use junitreport::filter::FilterEngine;
/// use junitreport::report::{CaseNode, Report, SuiteNode, Visibility};
///
/// let mut suite = SuiteNode::new("suite");
/// let class = suite.class_mut("tests.Sample");
/// class.add_case(CaseNode::passed("test_ok"));
/// class.add_case(CaseNode::failed("test_bad", "boom"));
/// class.status = class.aggregate_status();
/// suite.status = suite.aggregate_status();
/// let mut report = Report::new("example");
/// report.add_suite(suite);
///
/// let mut engine = FilterEngine::new();
/// engine.select_segment(&mut report, "failing-segment");
///
/// let cases = &report.suites[0].classes["tests.Sample"].cases;
/// assert!(cases[0].is_hidden());
/// assert!(cases[1].is_visible());
/// ```
#[derive(Debug, Default)]
pub struct FilterEngine {
    selected: Segment,
}

impl FilterEngine {
    /// Creates an engine with the `all` segment selected.
    pub fn new() -> Self {
        FilterEngine::default()
    }

    /// The currently selected segment.
    pub fn selected(&self) -> Segment {
        self.selected
    }

    /// Returns true if the given segment is the selected one.
    pub fn is_selected(&self, segment: Segment) -> bool {
        self.selected == segment
    }

    /// Select a segment by its control identifier and apply its rules.
    ///
    /// An unrecognized identifier leaves both the selection and the tree
    /// untouched. Re-selecting the current segment is a no-op.
    pub fn select_segment(&mut self, report: &mut Report, control: &str) {
        let Some(segment) = Segment::from_control_id(control) else {
            return;
        };
        self.select(report, segment);
    }

    /// Select a segment and apply its rules. No-op if already selected.
    pub fn select(&mut self, report: &mut Report, segment: Segment) {
        if self.is_selected(segment) {
            return;
        }
        self.selected = segment;
        self.apply(report);
    }

    /// Apply the selected segment's rule set to the whole tree.
    pub fn apply(&self, report: &mut Report) {
        match self.selected {
            Segment::All => apply_show_everything(report),
            Segment::Failing => apply_own_tag(report, Status::Failed),
            Segment::Passing => apply_propagating(report, Status::Passed),
            Segment::Aborting => apply_propagating(report, Status::Aborted),
        }
    }
}

/// `all`: every suite, class and outcome is shown.
fn apply_show_everything(report: &mut Report) {
    for suite in &mut report.suites {
        suite.show();
        for class in suite.classes.values_mut() {
            class.show();
            show_all(&mut class.cases);
        }
    }
}

/// Flat container rule: outcomes and containers are shown iff their own
/// tag matches.
fn apply_own_tag(report: &mut Report, wanted: Status) {
    for suite in &mut report.suites {
        suite.set_visible(suite.status == wanted);
        for class in suite.classes.values_mut() {
            class.set_visible(class.status == wanted);
            for case in &mut class.cases {
                case.set_visible(case.status == wanted);
            }
        }
    }
}

/// Propagating container rule: an outcome is shown iff its own tag
/// matches; a container is shown if its own tag matches or its subtree
/// holds a matching outcome.
fn apply_propagating(report: &mut Report, wanted: Status) {
    for suite in &mut report.suites {
        let suite_visible = suite.status == wanted || suite.contains_outcome(wanted);
        suite.set_visible(suite_visible);
        for class in suite.classes.values_mut() {
            let class_visible = class.status == wanted || class.contains_outcome(wanted);
            class.set_visible(class_visible);
            for case in &mut class.cases {
                case.set_visible(case.status == wanted);
            }
        }
    }
}

/// Flip the expanded state of a case row's detail body.
///
/// Independent of the segment filter: a row hidden by the filter keeps its
/// body state and vice versa.
pub fn toggle_tests(case: &mut CaseNode) {
    case.body_visible = !case.body_visible;
}

/// Flip every detail block carrying the given marker class.
///
/// Each matched block is inverted from its own current state, so a mixed
/// set of shown and hidden blocks stays mixed.
pub fn toggle_details(report: &mut Report, marker: &str) {
    for suite in &mut report.suites {
        for class in suite.classes.values_mut() {
            for case in &mut class.cases {
                for detail in &mut case.details {
                    if detail.marker == marker {
                        detail.toggle();
                    }
                }
            }
        }
    }
}

/// Hide every node in a collection.
pub fn hide_all<'a, T, I>(nodes: I)
where
    T: Visibility + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    for node in nodes {
        node.hide();
    }
}

/// Show every node in a collection.
pub fn show_all<'a, T, I>(nodes: I)
where
    T: Visibility + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    for node in nodes {
        node.show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SuiteNode;

    /// One suite with a passing and a failing class, tags aggregated.
    fn sample_report() -> Report {
        let mut suite = SuiteNode::new("suite");
        let c1 = suite.class_mut("tests.Good");
        c1.add_case(CaseNode::passed("test_ok"));
        c1.status = c1.aggregate_status();
        let c2 = suite.class_mut("tests.Bad");
        c2.add_case(CaseNode::failed("test_bad", "boom"));
        c2.status = c2.aggregate_status();
        suite.status = suite.aggregate_status();

        let mut report = Report::new("sample");
        report.add_suite(suite);
        report
    }

    fn case<'a>(report: &'a Report, class: &str, name: &str) -> &'a CaseNode {
        report.suites[0].classes[class]
            .cases
            .iter()
            .find(|c| c.name == name)
            .unwrap()
    }

    #[test]
    fn test_segment_from_control_id() {
        assert_eq!(Segment::from_control_id("all-segment"), Some(Segment::All));
        assert_eq!(
            Segment::from_control_id("failing-segment"),
            Some(Segment::Failing)
        );
        assert_eq!(
            Segment::from_control_id("passing-segment"),
            Some(Segment::Passing)
        );
        assert_eq!(
            Segment::from_control_id("aborting-segment"),
            Some(Segment::Aborting)
        );
        assert_eq!(Segment::from_control_id("bogus-segment"), None);
        assert_eq!(Segment::from_control_id(""), None);
    }

    #[test]
    fn test_segment_from_name() {
        assert_eq!(Segment::from_name("failing"), Some(Segment::Failing));
        assert_eq!(Segment::from_name("failing-segment"), Some(Segment::Failing));
        assert_eq!(Segment::from_name("FAILING"), None);
    }

    #[test]
    fn test_control_id_round_trip() {
        for segment in [
            Segment::All,
            Segment::Failing,
            Segment::Passing,
            Segment::Aborting,
        ] {
            assert_eq!(Segment::from_control_id(segment.control_id()), Some(segment));
            assert_eq!(Segment::from_name(segment.name()), Some(segment));
        }
    }

    #[test]
    fn test_engine_starts_on_all() {
        let engine = FilterEngine::new();
        assert_eq!(engine.selected(), Segment::All);
        assert!(engine.is_selected(Segment::All));
    }

    #[test]
    fn test_unrecognized_control_is_a_no_op() {
        let mut report = sample_report();
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "failing-segment");

        engine.select_segment(&mut report, "nonsense");

        // selection and tree untouched
        assert_eq!(engine.selected(), Segment::Failing);
        assert!(case(&report, "tests.Good", "test_ok").is_hidden());
        assert!(case(&report, "tests.Bad", "test_bad").is_visible());
    }

    #[test]
    fn test_reselecting_same_segment_is_a_no_op() {
        let mut report = sample_report();
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "failing-segment");

        // mutate the tree behind the engine's back
        report.suites[0].classes["tests.Bad"].cases[0].hide();
        engine.select_segment(&mut report, "failing-segment");

        // the guard fired: the manual change was not overwritten
        assert!(case(&report, "tests.Bad", "test_bad").is_hidden());
    }

    #[test]
    fn test_all_shows_everything() {
        let mut report = sample_report();
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "failing-segment");
        engine.select_segment(&mut report, "all-segment");

        assert!(report.suites[0].is_visible());
        assert!(report.suites[0].classes["tests.Good"].is_visible());
        assert!(report.suites[0].classes["tests.Bad"].is_visible());
        assert!(case(&report, "tests.Good", "test_ok").is_visible());
        assert!(case(&report, "tests.Bad", "test_bad").is_visible());
    }

    #[test]
    fn test_failing_follows_own_tags() {
        let mut report = sample_report();
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "failing-segment");

        assert!(report.suites[0].is_visible());
        assert!(report.suites[0].classes["tests.Bad"].is_visible());
        assert!(case(&report, "tests.Bad", "test_bad").is_visible());
        assert!(report.suites[0].classes["tests.Good"].is_hidden());
        assert!(case(&report, "tests.Good", "test_ok").is_hidden());
    }

    #[test]
    fn test_passing_shows_container_with_passing_descendant() {
        // suite is tagged failed but holds a passed outcome
        let mut report = sample_report();
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "passing-segment");

        assert!(report.suites[0].is_visible());
        assert!(report.suites[0].classes["tests.Good"].is_visible());
        assert!(case(&report, "tests.Good", "test_ok").is_visible());
        assert!(report.suites[0].classes["tests.Bad"].is_hidden());
        assert!(case(&report, "tests.Bad", "test_bad").is_hidden());
    }

    #[test]
    fn test_passing_shows_failed_class_with_passed_outcome() {
        let mut suite = SuiteNode::new("suite");
        let class = suite.class_mut("tests.Mixed");
        class.add_case(CaseNode::passed("test_ok"));
        class.add_case(CaseNode::failed("test_bad", "boom"));
        class.status = class.aggregate_status();
        suite.status = suite.aggregate_status();
        let mut report = Report::new("mixed");
        report.add_suite(suite);

        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "passing-segment");

        // the failed class stays visible because of its passed outcome
        assert!(report.suites[0].classes["tests.Mixed"].is_visible());
        assert!(case(&report, "tests.Mixed", "test_ok").is_visible());
        assert!(case(&report, "tests.Mixed", "test_bad").is_hidden());
    }

    #[test]
    fn test_aborting_surfaces_nested_aborts() {
        // passed-tagged suite, failed-tagged class, aborted outcome
        let mut suite = SuiteNode::new("suite");
        suite.status = Status::Passed;
        let class = suite.class_mut("tests.Deep");
        class.add_case(CaseNode::aborted("test_err", "panicked"));
        class.add_case(CaseNode::failed("test_bad", "boom"));
        class.status = Status::Failed;
        let mut report = Report::new("aborts");
        report.add_suite(suite);

        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "aborting-segment");

        assert!(report.suites[0].is_visible());
        assert!(report.suites[0].classes["tests.Deep"].is_visible());
        assert!(case(&report, "tests.Deep", "test_err").is_visible());
        assert!(case(&report, "tests.Deep", "test_bad").is_hidden());
    }

    #[test]
    fn test_aborting_hides_containers_without_aborts() {
        let mut report = sample_report();
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "aborting-segment");

        assert!(report.suites[0].is_hidden());
        assert!(report.suites[0].classes["tests.Good"].is_hidden());
        assert!(report.suites[0].classes["tests.Bad"].is_hidden());
        assert!(case(&report, "tests.Good", "test_ok").is_hidden());
        assert!(case(&report, "tests.Bad", "test_bad").is_hidden());
    }

    #[test]
    fn test_empty_report_is_a_valid_no_op() {
        let mut report = Report::new("empty");
        let mut engine = FilterEngine::new();
        engine.select_segment(&mut report, "failing-segment");
        assert_eq!(engine.selected(), Segment::Failing);
    }

    #[test]
    fn test_toggle_tests_round_trip() {
        let mut case = CaseNode::passed("test_ok");
        assert!(case.body_visible);
        toggle_tests(&mut case);
        assert!(!case.body_visible);
        toggle_tests(&mut case);
        assert!(case.body_visible);
    }

    #[test]
    fn test_toggle_details_flips_each_block_independently() {
        let mut suite = SuiteNode::new("suite");
        let class = suite.class_mut("tests.Sample");
        class.add_case(CaseNode::passed("a").with_detail("stdout", "one"));
        class.add_case(CaseNode::passed("b").with_detail("stdout", "two"));
        class.add_case(CaseNode::passed("c").with_detail("stdout", "three"));
        class.cases[1].details[0].hide();
        let mut report = Report::new("details");
        report.add_suite(suite);

        toggle_details(&mut report, "stdout");

        let states: Vec<bool> = report.suites[0].classes["tests.Sample"]
            .cases
            .iter()
            .map(|c| c.details[0].visible)
            .collect();
        assert_eq!(states, vec![false, true, false]);
    }

    #[test]
    fn test_toggle_details_ignores_other_markers() {
        let mut suite = SuiteNode::new("suite");
        let class = suite.class_mut("tests.Sample");
        class.add_case(
            CaseNode::passed("a")
                .with_detail("stdout", "one")
                .with_detail("stderr", "two"),
        );
        let mut report = Report::new("details");
        report.add_suite(suite);

        toggle_details(&mut report, "stderr");

        let case = &report.suites[0].classes["tests.Sample"].cases[0];
        assert!(case.details[0].visible);
        assert!(!case.details[1].visible);
    }

    #[test]
    fn test_hide_all_and_show_all() {
        let mut cases = vec![CaseNode::passed("a"), CaseNode::passed("b")];
        hide_all(&mut cases);
        assert!(cases.iter().all(|c| c.is_hidden()));
        show_all(&mut cases);
        assert!(cases.iter().all(|c| c.is_visible()));
    }
}
