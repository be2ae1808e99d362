pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use config::Config;
use handlers::rest;
use service::NoteService;

/// Full HTTP surface: health, notes CRUD, OpenAPI document and Swagger UI,
/// wrapped in CORS and request tracing. Request bodies are uncapped unless
/// `body_limit_bytes` is set.
pub fn app(service: Arc<NoteService>, cfg: &Config) -> Router {
    let body_limit = cfg
        .body_limit_bytes
        .map_or_else(DefaultBodyLimit::disable, DefaultBodyLimit::max);

    Router::new()
        .route("/", get(rest::health_check))
        .route("/health", get(rest::health_check))
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .merge(SwaggerUi::new("/docs").url("/openapi.json", rest::ApiDoc::openapi()))
        .method_not_allowed_fallback(rest::method_not_allowed)
        .fallback(rest::not_found)
        .with_state(service)
        .layer(body_limit)
        .layer(cors_layer(&cfg.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring invalid CORS origin '{origin}': {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
