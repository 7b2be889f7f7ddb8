use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Creates a CORS layer for the given origins.
///
/// - Methods: GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Accept
/// - Max age: 1 hour
///
/// Fails when an origin is not a valid header value or the list is empty.
pub fn create_cors_layer(origins: &[String]) -> io::Result<CorsLayer> {
    let allowed_origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS configured with allowed origins: {}", origins.join(","));

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Picks the CORS layer for the configured origins.
///
/// Configured origins always win. With none configured, development falls
/// back to the permissive layer and production refuses to start.
pub fn cors_for(origins: &[String], allow_permissive: bool) -> io::Result<CorsLayer> {
    if origins.is_empty() && allow_permissive {
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    }
    create_cors_layer(origins)
}
