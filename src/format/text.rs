//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapView;
use crate::places::SearchOutcome;

/// Text formatter - outputs the ranked place list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable ranked list"
    }

    fn format(&self, outcome: &SearchOutcome, _map: &MapView, config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", outcome.message()));

        for (rank, place) in outcome.places.iter().enumerate() {
            output.push_str(&format!("\n{:>3}. {}\n", rank + 1, place.label));
            output.push_str(&format!("     Distance: {}\n", place.distance_text()));
            output.push_str(&format!("     {}\n", place.map_url));
        }

        if !outcome.places.is_empty() {
            let origin = outcome.origin;
            output.push_str(&format!(
                "\nSearched around {:.5}, {:.5}\n     {}\n",
                origin.lat,
                origin.lng,
                config.format_url(None, origin.lat, origin.lng)?
            ));
        }

        Ok(output)
    }
}
