//! Command system for junitreport
//!
//! Commands are discovered and executed through the Command trait.

use crate::error::Result;
use crate::ui::UI;

pub mod failing;
pub mod render;
pub mod show;
pub mod summary;
mod utils;

pub use failing::FailingCommand;
pub use render::RenderCommand;
pub use show::ShowCommand;
pub use summary::SummaryCommand;

/// Trait that all commands must implement
pub trait Command {
    /// Execute the command
    fn execute(&self, ui: &mut dyn UI) -> Result<i32>;

    /// Get the command name
    fn name(&self) -> &str;

    /// Get command help text
    fn help(&self) -> &str;
}
