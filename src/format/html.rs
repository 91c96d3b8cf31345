//! HTML map page formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::page::Page;
use crate::map::MapView;
use crate::places::{SearchOutcome, SUGGESTED_CATEGORIES};
use crate::session::granted_message;

/// HTML formatter - standalone Leaflet page with markers and the place list
pub struct HtmlFormatter;

impl OutputFormatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone map page"
    }

    fn format(&self, outcome: &SearchOutcome, map: &MapView, _config: &Config) -> Result<String> {
        let status = vec![granted_message(outcome.origin)];

        Ok(Page {
            status: &status,
            map: Some(map),
            outcome: Some(outcome),
            categories: SUGGESTED_CATEGORIES,
            selected: Some(outcome.category.as_str()),
            ..Default::default()
        }
        .render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample;

    #[test]
    fn test_html_format() {
        let (outcome, map) = sample();
        let output = HtmlFormatter
            .format(&outcome, &map, &Config::default())
            .unwrap();

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("L.map(\"map\")"));
        assert!(output.contains("<h3>Nearby cafes:</h3>"));
        assert!(output.contains("Bean &amp; Leaf"));
        assert!(output.contains("Latitude: 40.71280"));
    }
}
