//! Output formatters
//!
//! Provides trait-based output formatting for search results.

pub mod gpx;
pub mod html;
pub mod json;
pub mod text;

use crate::config::Config;
use crate::error::Result;
use crate::map::MapView;
use crate::places::SearchOutcome;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a search outcome
    ///
    /// # Arguments
    /// * `outcome` - The ranked search results
    /// * `map` - The map view the results were marked on
    /// * `config` - Application config
    fn format(&self, outcome: &SearchOutcome, map: &MapView, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "html" => Some(Box::new(html::HtmlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    let formatters: [Box<dyn OutputFormatter>; 4] = [
        Box::new(text::TextFormatter),
        Box::new(json::JsonFormatter),
        Box::new(gpx::GpxFormatter),
        Box::new(html::HtmlFormatter),
    ];

    formatters
        .iter()
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}
