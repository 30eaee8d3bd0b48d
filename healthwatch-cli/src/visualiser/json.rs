//! JSON report rendering.

use healthwatch_sdk::Report;

use super::Visualiser;

/// Renders a report as pretty-printed JSON, one object per node with
/// `name`, `kind`, `status`, and `children` fields.
#[derive(Debug, Default)]
pub struct Json;

impl Visualiser for Json {
    fn visualise(&self, report: &Report) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
