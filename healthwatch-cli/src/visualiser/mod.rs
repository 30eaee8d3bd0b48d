//! Rendering of evaluated reports.
//!
//! A [`Visualiser`] turns a [`Report`] tree into text. Two renderers are
//! built in: [`Console`] draws an indented tree with status symbols, and
//! [`Json`] emits the report as pretty-printed JSON.

mod console;
mod json;

pub use console::{Console, Show, Symbols};
pub use json::Json;

use healthwatch_sdk::Report;

/// Renders a report tree as text.
pub trait Visualiser {
    /// Render the report. The returned string carries no trailing newline.
    fn visualise(&self, report: &Report) -> anyhow::Result<String>;
}
