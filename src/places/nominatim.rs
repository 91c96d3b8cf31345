//! Nominatim place search backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for bounded free-text search.
//! Rate limit: 1 request per second (not enforced here)

use crate::constants::api::USER_AGENT;
use crate::error::{Error, Result};
use crate::places::{PlaceQuery, PlaceSearchBackend, RawPlace};
use tracing::{debug, warn};

/// Nominatim search backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimBackend {
    /// Create a backend against a specific Nominatim instance
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full search URL for a query
    pub fn search_url(&self, query: &PlaceQuery) -> String {
        format!("{}/search?{}", self.base_url, query.to_query_string())
    }
}

impl PlaceSearchBackend for NominatimBackend {
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<RawPlace>> {
        let url = self.search_url(query);
        debug!("Nominatim search: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Nominatim request failed: {}", e);
            Error::Search(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            warn!("Nominatim returned status: {}", response.status());
            return Err(Error::Search(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse Nominatim response: {}", e);
            Error::Search(format!("Failed to parse Nominatim response: {}", e))
        })
    }
}
