//! Error types for nearby

use crate::constants::messages;
use crate::geo::LocationError;
use thiserror::Error;

/// Main error type for nearby operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Location(#[from] LocationError),

    #[error("{}", messages::SELECT_CATEGORY)]
    EmptyCategory,

    #[error("Location has not been acquired yet")]
    NotLocated,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Place search failed: {0}")]
    Search(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Text shown to the user for this failure
    ///
    /// Search-side failures all collapse to the same retry-later message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Location(e) => e.to_string(),
            Self::Search(_) | Self::Http(_) | Self::Json(_) => messages::FETCH_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for nearby operations
pub type Result<T> = std::result::Result<T, Error>;
