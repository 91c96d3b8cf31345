//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::page::escape_markup;
use crate::map::MapView;
use crate::places::SearchOutcome;

/// GPX formatter - outputs GPX waypoint file
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, outcome: &SearchOutcome, _map: &MapView, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="nearby">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>Nearby {}s ({})</name>\n",
            escape_markup(outcome.category.as_str()),
            outcome.id
        ));
        gpx.push_str(&format!("    <time>{}</time>\n", outcome.timestamp));
        gpx.push_str("  </metadata>\n");

        // User waypoint
        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            outcome.origin.lat, outcome.origin.lng
        ));
        gpx.push('\n');
        gpx.push_str("    <name>You are here</name>\n");
        gpx.push_str("    <sym>flag</sym>\n");
        gpx.push_str("  </wpt>\n");

        // Places, nearest first
        for place in &outcome.places {
            gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, place.lat, place.lng));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_markup(&place.label)));
            gpx.push_str(&format!(
                "    <desc>{} ({})</desc>\n",
                escape_markup(&place.display_name),
                place.distance_text()
            ));
            gpx.push_str(&format!(
                "    <link href=\"{}\"/>\n",
                escape_markup(&place.map_url)
            ));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
