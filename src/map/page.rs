//! Standalone HTML page for a map view
//!
//! Renders the status text, the Leaflet map (only once a map exists), the
//! search form and the ranked place list into one document.

use crate::constants::map::LEAFLET_VERSION;
use crate::map::{MapView, Marker};
use crate::places::SearchOutcome;
use serde::Serialize;

/// Everything a page shows
#[derive(Debug, Default)]
pub struct Page<'a> {
    /// Status lines from location acquisition
    pub status: &'a [String],
    /// Map view; no map container is rendered without one
    pub map: Option<&'a MapView>,
    /// Search results to list
    pub outcome: Option<&'a SearchOutcome>,
    /// Text shown in place of a result list (progress or failure)
    pub list_message: Option<&'a str>,
    /// Blocking alert raised on load
    pub alert: Option<&'a str>,
    /// Categories offered by the search form
    pub categories: &'a [&'a str],
    /// Currently selected category
    pub selected: Option<&'a str>,
}

/// Map setup handed to the page script
#[derive(Serialize)]
struct MapScript<'a> {
    lat: f64,
    lng: f64,
    zoom: u8,
    tile_url: &'a str,
    max_zoom: u8,
    attribution: &'a str,
    markers: Vec<Marker>,
}

impl Page<'_> {
    /// Render the full HTML document
    pub fn render(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        html.push_str("  <title>Nearby places</title>\n");
        html.push_str(&format!(
            "  <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@{}/dist/leaflet.css\">\n",
            LEAFLET_VERSION
        ));
        html.push_str("  <style>#map { height: 420px; } .place-item { margin: 0.5em 0; }</style>\n");
        html.push_str("</head>\n<body>\n");

        // Status
        html.push_str("  <div id=\"locationOutput\">");
        let lines: Vec<String> = self
            .status
            .iter()
            .map(|l| escape_markup(l).replace('\n', "<br>"))
            .collect();
        html.push_str(&lines.join("<br>"));
        html.push_str("</div>\n");

        if let Some(map) = self.map {
            html.push_str("  <div id=\"map\"></div>\n");
            self.push_search_form(&mut html, map);
        }

        self.push_place_list(&mut html);

        if let Some(map) = self.map {
            html.push_str(&format!(
                "  <script src=\"https://unpkg.com/leaflet@{}/dist/leaflet.js\"></script>\n",
                LEAFLET_VERSION
            ));
            html.push_str("  <script>\n");
            html.push_str(&format!("    const view = {};\n", map_script(map)));
            html.push_str(concat!(
                "    const map = L.map(\"map\").setView([view.lat, view.lng], view.zoom);\n",
                "    L.tileLayer(view.tile_url, { maxZoom: view.max_zoom, attribution: view.attribution }).addTo(map);\n",
                "    for (const m of view.markers) {\n",
                "      const marker = L.marker([m.lat, m.lng]).addTo(map).bindPopup(m.popup);\n",
                "      if (m.open) marker.openPopup();\n",
                "    }\n",
            ));
            html.push_str("  </script>\n");
        }

        if let Some(alert) = self.alert {
            html.push_str(&format!("  <script>alert({});</script>\n", js_string(alert)));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn push_search_form(&self, html: &mut String, map: &MapView) {
        let center = map.center();
        html.push_str("  <form id=\"searchSection\" method=\"get\" action=\"/map\">\n");
        html.push_str(&format!(
            "    <input type=\"hidden\" name=\"lat\" value=\"{}\">\n",
            center.lat
        ));
        html.push_str(&format!(
            "    <input type=\"hidden\" name=\"lng\" value=\"{}\">\n",
            center.lng
        ));
        html.push_str("    <select id=\"placeType\" name=\"category\">\n");
        html.push_str("      <option value=\"\">-- Select place type --</option>\n");
        for category in self.categories {
            let selected = if self.selected == Some(*category) {
                " selected"
            } else {
                ""
            };
            html.push_str(&format!(
                "      <option value=\"{0}\"{1}>{0}</option>\n",
                escape_markup(category),
                selected
            ));
        }
        html.push_str("    </select>\n");
        html.push_str("    <button id=\"searchBtn\" type=\"submit\">Search</button>\n");
        html.push_str("  </form>\n");
    }

    fn push_place_list(&self, html: &mut String) {
        html.push_str("  <div id=\"placesList\">");

        if let Some(message) = self.list_message {
            html.push_str(&escape_markup(message));
        } else if let Some(outcome) = self.outcome {
            let message = escape_markup(&outcome.message());
            if outcome.places.is_empty() {
                html.push_str(&message);
            } else {
                html.push_str(&format!("\n    <h3>{}</h3>\n", message));
                for place in &outcome.places {
                    html.push_str(&format!(
                        concat!(
                            "    <div class=\"place-item\">\n",
                            "      <strong>{}</strong><br>\n",
                            "      Distance: {}<br>\n",
                            "      <a href=\"{}\" target=\"_blank\">View on map</a>\n",
                            "    </div>\n",
                        ),
                        escape_markup(&place.label),
                        place.distance_text(),
                        escape_markup(&place.map_url)
                    ));
                }
                html.push_str("  ");
            }
        }

        html.push_str("</div>\n");
    }
}

/// Escape text for HTML/XML content and attribute values
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON literal safe to embed inside a `<script>` element
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn map_script(map: &MapView) -> String {
    let tiles = map.tiles();
    let script = MapScript {
        lat: map.center().lat,
        lng: map.center().lng,
        zoom: map.zoom(),
        tile_url: &tiles.url_template,
        max_zoom: tiles.max_zoom,
        attribution: &tiles.attribution,
        // Leaflet popups take HTML
        markers: map
            .markers()
            .iter()
            .map(|m| Marker {
                popup: escape_markup(&m.popup),
                ..m.clone()
            })
            .collect(),
    };

    serde_json::to_string(&script)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::map::MapPresenter;
    use crate::places::{PlaceResult, SearchCategory};

    fn outcome(places: Vec<PlaceResult>) -> SearchOutcome {
        SearchOutcome {
            id: "test".to_string(),
            category: SearchCategory::parse("cafe").unwrap(),
            origin: Coordinates::new(40.0, -73.0),
            raw_count: places.len(),
            places,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup("<b>Tom & \"Jerry's\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_without_map() {
        let status = vec!["User denied location access.".to_string()];
        let html = Page {
            status: &status,
            ..Default::default()
        }
        .render();

        assert!(html.contains("User denied location access."));
        assert!(!html.contains("id=\"map\""));
        assert!(!html.contains("searchSection"));
        assert!(!html.contains("leaflet.js"));
    }

    #[test]
    fn test_page_with_map_and_results() {
        let mut map = MapPresenter::default().present(Coordinates::new(40.0, -73.0));
        map.add_marker(Coordinates::new(40.01, -73.0), "Joe's <Diner>");

        let result = outcome(vec![PlaceResult {
            display_name: "Joe's <Diner>, Main St".to_string(),
            label: "Joe's <Diner>".to_string(),
            lat: 40.01,
            lng: -73.0,
            distance_km: 1.1119,
            map_url: "https://www.google.com/maps?q=40.01,-73".to_string(),
        }]);

        let html = Page {
            map: Some(&map),
            outcome: Some(&result),
            categories: &["cafe", "bank"],
            selected: Some("cafe"),
            ..Default::default()
        }
        .render();

        assert!(html.contains("id=\"map\""));
        assert!(html.contains("<h3>Nearby cafes:</h3>"));
        assert!(html.contains("Joe&#39;s &lt;Diner&gt;"));
        assert!(html.contains("Distance: 1.11 km"));
        assert!(html.contains("<option value=\"cafe\" selected>cafe</option>"));
        assert!(html.contains("You are here!"));
        assert!(!html.contains("<Diner>"));
    }

    #[test]
    fn test_page_empty_results_and_alert() {
        let map = MapPresenter::default().present(Coordinates::new(0.0, 0.0));
        let empty = outcome(vec![]);

        let html = Page {
            map: Some(&map),
            outcome: Some(&empty),
            alert: Some("Please select a place type!"),
            ..Default::default()
        }
        .render();

        assert!(html.contains("No nearby places found."));
        assert!(html.contains("alert(\"Please select a place type!\")"));
        assert!(!html.contains("place-item"));
    }
}
