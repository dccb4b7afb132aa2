//! junitreport - Command-line viewer for JUnit test reports

use clap::{Parser, Subcommand};
use junitreport::commands::*;
use junitreport::error::Result;
use junitreport::ui::UI;
use std::io::Write;

#[derive(Parser)]
#[command(name = "junitreport")]
#[command(about = "JUnit test report viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a report in the terminal with a segment filter applied
    Show {
        /// Path to the JUnit XML report
        report: String,

        /// Segment to select: all, failing, passing or aborting
        #[arg(short, long)]
        segment: Option<String>,

        /// Collapse detail blocks with this marker (repeatable)
        #[arg(long)]
        collapse: Vec<String>,
    },

    /// Show failing tests from a report
    Failing {
        /// Path to the JUnit XML report
        report: String,

        /// List test IDs only, one per line (for scripting)
        #[arg(long)]
        list: bool,
    },

    /// Show per-status counts for a report
    Summary {
        /// Path to the JUnit XML report
        report: String,
    },

    /// Write the filtered report as a static HTML page
    Render {
        /// Path to the JUnit XML report
        report: String,

        /// Output file to write
        #[arg(short = 'o', long, default_value = "report.html")]
        output: String,

        /// Segment to select: all, failing, passing or aborting
        #[arg(short, long)]
        segment: Option<String>,
    },
}

/// Simple UI implementation that writes to stdout/stderr
struct CliUI;

impl UI for CliUI {
    fn output(&mut self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        eprintln!("Error: {}", message);
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        eprintln!("Warning: {}", message);
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    let mut ui = CliUI;

    let result = match cli.command {
        Commands::Show {
            report,
            segment,
            collapse,
        } => {
            let cmd = ShowCommand::new(report)
                .with_segment(segment)
                .with_collapse(collapse);
            cmd.execute(&mut ui)
        }
        Commands::Failing { report, list } => {
            let cmd = if list {
                FailingCommand::with_list_only(report)
            } else {
                FailingCommand::new(report)
            };
            cmd.execute(&mut ui)
        }
        Commands::Summary { report } => {
            let cmd = SummaryCommand::new(report);
            cmd.execute(&mut ui)
        }
        Commands::Render {
            report,
            output,
            segment,
        } => {
            let cmd = RenderCommand::new(report, output).with_segment(segment);
            cmd.execute(&mut ui)
        }
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {}", e);
            std::process::exit(1);
        }
    }
}
