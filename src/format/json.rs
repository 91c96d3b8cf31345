//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapView;
use crate::places::SearchOutcome;

/// JSON formatter - outputs the full outcome as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON search outcome"
    }

    fn format(&self, outcome: &SearchOutcome, _map: &MapView, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(outcome)?)
    }
}
