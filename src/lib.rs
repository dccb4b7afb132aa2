//! junitreport - A filtering viewer for JUnit test reports
//!
//! This is a Rust port of the Python junit2htmlreport tool, centered on its
//! report filter: the rule set that decides which suites, classes and case
//! outcomes stay visible under a named segment (all / failing / passing /
//! aborting).
//!
//! # Overview
//!
//! junitreport loads JUnit XML result files into a suite/class/outcome tree
//! and projects segment filters onto it. Container visibility propagates:
//! under the passing and aborting segments a container whose own tag does
//! not match is still shown when its subtree holds a matching outcome.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`report`]: The report document tree and node visibility flags
//! - [`filter`]: The segment filter engine and row toggle helpers
//! - [`junit`]: JUnit XML parsing into the report tree
//! - [`render`]: Terminal rendering of the visible projection
//! - [`html`]: Static HTML rendering with the report class vocabulary
//! - [`commands`]: All user-facing commands (show, failing, summary, render)
//! - [`config`]: .junitreport.conf configuration file parsing
//! - [`ui`]: User interface abstraction for output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```
//! use junitreport::filter::{FilterEngine, Segment};
//! use junitreport::junit;
//! use junitreport::report::Visibility;
//!
//! # fn main() -> junitreport::error::Result<()> {
//! let xml = r#"<testsuite name="s">
//!   <testcase classname="tests.Good" name="test_ok"/>
//!   <testcase classname="tests.Bad" name="test_bad">
//!     <failure message="boom"/>
//!   </testcase>
//! </testsuite>"#;
//!
//! let mut report = junit::parse(xml, "example")?;
//!
//! // Narrow the view to failing results
//! let mut engine = FilterEngine::new();
//! engine.select(&mut report, Segment::Failing);
//!
//! let visible: Vec<&str> = report
//!     .cases()
//!     .filter(|case| case.is_visible())
//!     .map(|case| case.name.as_str())
//!     .collect();
//! assert_eq!(visible, vec!["test_bad"]);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod html;
pub mod junit;
pub mod render;
pub mod report;
pub mod ui;

pub use error::{Error, Result};
pub use filter::{FilterEngine, Segment};
pub use report::{Report, Status};
