//! HTTP API routes
//!
//! Defines all REST API endpoints and the server-rendered map page.

use crate::constants::messages;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::format::available_formats;
use crate::geo::{LocationError, PositionProvider};
use crate::map::page::Page;
use crate::places::{SearchOutcome, SUGGESTED_CATEGORIES};
use crate::server::state::AppState;
use crate::session::{Session, StatusLog};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::debug;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Determine static files path
    // Try relative to cwd first, then next to the executable
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        match exe_path.parent().map(|dir| dir.join("static")) {
            Some(path) if path.exists() => path.to_string_lossy().to_string(),
            _ => "static".to_string(),
        }
    } else {
        "static".to_string()
    };

    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/location", get(location_handler))
        .route("/api/places", get(places_handler))
        .route("/map", get(map_handler))
        .fallback_service(ServeDir::new(&static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// An API error together with its HTTP status
#[derive(Debug)]
pub struct ApiRejection {
    pub status: StatusCode,
    pub body: ApiError,
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<Error> for ApiRejection {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::Location(e) => (StatusCode::BAD_REQUEST, e.code()),
            Error::EmptyCategory => (StatusCode::BAD_REQUEST, "EMPTY_CATEGORY"),
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::NotLocated => (StatusCode::BAD_REQUEST, "NOT_LOCATED"),
            Error::Search(_) | Error::Http(_) | Error::Json(_) => {
                (StatusCode::BAD_GATEWAY, "SEARCH_ERROR")
            }
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Error::Io(_) | Error::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        ApiRejection {
            status,
            body: ApiError {
                error: err.user_message(),
                code: code.to_string(),
            },
        }
    }
}

impl From<LocationError> for ApiRejection {
    fn from(err: LocationError) -> Self {
        Error::from(err).into()
    }
}

/// Unwrap query parameters, answering malformed ones with an `ApiError`
///
/// Both query types carry the coordinates, so a bad query is reported as
/// invalid coordinates.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiRejection> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| Error::InvalidCoordinates(rejection.body_text()).into())
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Place search endpoint in use
    pub search_endpoint: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let search_endpoint = state.config.read().await.search.endpoint.clone();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        search_endpoint,
        uptime_secs: state.uptime_secs(),
    })
}

/// Categories list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// List suggested place categories
///
/// GET /api/categories
async fn categories_handler() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: SUGGESTED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<crate::format::FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Located position response
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationResponse {
    pub lat: f64,
    pub lng: f64,
    pub message: String,
}

/// Locate using the server's configured position provider
///
/// GET /api/location
async fn location_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LocationResponse>, ApiRejection> {
    let location_config = state.config.read().await.location.clone();
    let provider = PositionProvider::from_config(&location_config);

    let mut session = Session::new();
    let mut status = StatusLog::new();
    let coords = session
        .locate(provider.as_ref(), &state.presenter, &mut status)
        .await?;

    Ok(Json(LocationResponse {
        lat: coords.lat,
        lng: coords.lng,
        message: status.last().unwrap_or_default().to_string(),
    }))
}

/// Place search query
#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub category: String,
}

/// Place search response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    /// List heading or the empty-result text
    pub message: String,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// Search nearby places
///
/// GET /api/places?lat=..&lng=..&category=..
async fn places_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlacesQuery>, QueryRejection>,
) -> Result<Json<PlacesResponse>, ApiRejection> {
    let query = query_params(query)?;
    let origin = Coordinates::new(query.lat, query.lng);
    origin.validate()?;

    let mut session = Session::new();
    session
        .locate(
            Some(&PositionProvider::fixed(origin)),
            &state.presenter,
            &mut StatusLog::new(),
        )
        .await?;

    let outcome = session
        .search(&state.finder, &query.category, &mut StatusLog::new())
        .await?;

    Ok(Json(PlacesResponse {
        message: outcome.message(),
        outcome,
    }))
}

/// Map page query
///
/// `error` carries a geolocation error code reported by the browser.
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: Option<String>,
    pub error: Option<u16>,
}

/// Server-rendered map page
///
/// GET /map?lat=..&lng=..[&category=..] or GET /map?error=<code>
async fn map_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MapQuery>, QueryRejection>,
) -> Result<Html<String>, ApiRejection> {
    let query = query_params(query)?;
    let location_config = state.config.read().await.location.clone();

    let provider = match (query.error, query.lat, query.lng) {
        (Some(code), _, _) => Some(PositionProvider::Reported(LocationError::from_code(code))),
        (None, Some(lat), Some(lng)) => {
            let coords = Coordinates::new(lat, lng);
            coords.validate()?;
            Some(PositionProvider::fixed(coords))
        }
        _ => PositionProvider::from_config(&location_config),
    };

    let mut session = Session::new();
    let mut status = StatusLog::new();
    if let Err(err) = session
        .locate(provider.as_ref(), &state.presenter, &mut status)
        .await
    {
        debug!("Map page without location: {}", err);
    }

    let mut list = StatusLog::new();
    let mut outcome = None;
    let mut alert = None;
    if let (true, Some(category)) = (session.search_enabled(), query.category.as_deref()) {
        match session.search(&state.finder, category, &mut list).await {
            Ok(found) => outcome = Some(found),
            Err(Error::EmptyCategory) => alert = Some(messages::SELECT_CATEGORY),
            Err(err) => debug!("Map page search failed: {}", err),
        }
    }
    let list_message = match &outcome {
        Some(_) => None,
        None => list.last(),
    };

    let page = Page {
        status: status.lines(),
        map: session.map(),
        outcome: outcome.as_ref(),
        list_message,
        alert,
        categories: SUGGESTED_CATEGORIES,
        selected: query.category.as_deref(),
    };

    Ok(Html(page.render()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mockito::Matcher;
    use tower::ServiceExt;

    fn create_test_state(search_endpoint: &str) -> Arc<AppState> {
        let mut config = Config::default();
        config.search.endpoint = search_endpoint.to_string();
        config.location.cache = false;
        Arc::new(AppState::new(config).unwrap())
    }

    fn create_state_with(config: Config) -> Arc<AppState> {
        Arc::new(AppState::new(config).unwrap())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn places_body(count: usize) -> String {
        // Listed farthest first so ranking has work to do
        let places: Vec<serde_json::Value> = (0..count)
            .rev()
            .map(|i| {
                serde_json::json!({
                    "place_id": i,
                    "lat": format!("{}", 40.0 + i as f64 * 0.002),
                    "lon": "-73.0",
                    "display_name": format!("Diner {}, Main Street, Town", i),
                })
            })
            .collect();
        serde_json::Value::Array(places).to_string()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.running);
        assert_eq!(parsed.search_endpoint, "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/api/categories").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: CategoriesResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.categories.contains(&"restaurant".to_string()));
        assert!(parsed.categories.contains(&"hospital".to_string()));
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/api/formats").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: FormatsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.formats.len(), 4);
    }

    #[tokio::test]
    async fn test_location_unsupported() {
        let mut config = Config::default();
        config.location.provider = "none".to_string();
        let app = create_router(create_state_with(config));

        let (status, body) = get(app, "/api/location").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "UNSUPPORTED");
    }

    #[tokio::test]
    async fn test_location_denied() {
        let mut config = Config::default();
        config.location.allow = false;
        let app = create_router(create_state_with(config));

        let (status, body) = get(app, "/api/location").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "PERMISSION_DENIED");
        assert_eq!(err.error, "User denied location access.");
    }

    #[tokio::test]
    async fn test_places_endpoint_ranks_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "restaurant".into()),
                Matcher::UrlEncoded("limit".into(), "50".into()),
                Matcher::UrlEncoded("bounded".into(), "1".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(places_body(25))
            .create_async()
            .await;

        let app = create_router(create_test_state(&server.url()));
        let (status, body) = get(app, "/api/places?lat=40.0&lng=-73.0&category=restaurant").await;

        assert_eq!(status, StatusCode::OK);
        mock.assert_async().await;

        let parsed: PlacesResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.message, "Nearby restaurants:");
        assert_eq!(parsed.outcome.raw_count, 25);
        assert_eq!(parsed.outcome.places.len(), 20);
        assert_eq!(parsed.outcome.places[0].label, "Diner 0");
        assert_eq!(parsed.outcome.places[0].distance_text(), "0.00 km");
        assert_eq!(parsed.outcome.places[19].label, "Diner 19");
    }

    #[tokio::test]
    async fn test_places_endpoint_empty_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let app = create_router(create_test_state(&server.url()));
        let (status, body) = get(app, "/api/places?lat=40.0&lng=-73.0&category=hospital").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: PlacesResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.message, "No nearby places found.");
        assert!(parsed.outcome.places.is_empty());
    }

    #[tokio::test]
    async fn test_places_endpoint_empty_category() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = create_router(create_test_state(&server.url()));
        let (status, body) = get(app, "/api/places?lat=40.0&lng=-73.0&category=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "EMPTY_CATEGORY");
        assert_eq!(err.error, "Please select a place type!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_places_endpoint_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let app = create_router(create_test_state(&server.url()));
        let (status, body) = get(app, "/api/places?lat=40.0&lng=-73.0&category=bank").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "SEARCH_ERROR");
        assert_eq!(err.error, "Error fetching places. Try again later.");
    }

    #[tokio::test]
    async fn test_places_endpoint_invalid_coordinates() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/api/places?lat=91.0&lng=-73.0&category=cafe").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_places_endpoint_malformed_latitude() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/api/places?lat=abc&lng=-73&category=cafe").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_places_endpoint_missing_coordinates() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/api/places?category=cafe").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
        assert!(err.error.contains("lat"));
    }

    #[tokio::test]
    async fn test_map_page_malformed_coordinates() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/map?lat=40.0&lng=west").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_map_page_permission_denied() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/map?error=1").await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("User denied location access."));
        assert!(!html.contains("id=\"map\""));
        assert!(!html.contains("searchSection"));
    }

    #[tokio::test]
    async fn test_map_page_located() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/map?lat=40.0&lng=-73.0").await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Location Access Granted!"));
        assert!(html.contains("id=\"map\""));
        assert!(html.contains("searchSection"));
        assert!(html.contains("You are here!"));
    }

    #[tokio::test]
    async fn test_map_page_empty_category_alerts() {
        let app = create_router(create_test_state("http://127.0.0.1:9"));
        let (status, body) = get(app, "/map?lat=40.0&lng=-73.0&category=").await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("alert(\"Please select a place type!\")"));
    }

    #[tokio::test]
    async fn test_map_page_with_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(places_body(3))
            .create_async()
            .await;

        let app = create_router(create_test_state(&server.url()));
        let (status, body) = get(app, "/map?lat=40.0&lng=-73.0&category=cafe").await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("<h3>Nearby cafes:</h3>"));
        assert_eq!(html.matches("class=\"place-item\"").count(), 3);
    }

    #[tokio::test]
    async fn test_map_page_search_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let app = create_router(create_test_state(&server.url()));
        let (_, body) = get(app, "/map?lat=40.0&lng=-73.0&category=cafe").await;

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Error fetching places. Try again later."));
        assert!(html.contains("id=\"map\""));
    }
}
