use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::CorsLayer;

// `*` cannot appear in an origin list, nor alongside credentials
fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin, list explicit origins instead");
                return None;
            }
            match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            }
        })
        .collect()
}

// CORS configuration using the allowed origins from config
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = parse_origins(allowed_origins);

    tracing::info!("CORS allowed origins: {:?}", origins);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
