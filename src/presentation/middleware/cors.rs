//! CORS Middleware Configuration

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

/// Create CORS layer from settings
///
/// The API is read-mostly; only `GET` and `POST` are exposed cross-origin.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<_> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer
            .allow_origin(origins)
            .max_age(std::time::Duration::from_secs(3600))
    }
}
