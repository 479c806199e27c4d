//! Router construction for the NLP gateway.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::service::TextAnalyzer;

/// Build the axum router with all routes and middleware.
///
/// Bodies larger than `max_body_bytes` are rejected with 413 before parsing.
pub fn build_router(analyzer: TextAnalyzer, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/tokenize", post(handlers::tokenize::tokenize))
        .route("/pos_tag", post(handlers::pos_tag::pos_tag))
        .route("/ner", post(handlers::ner::ner))
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(analyzer))
}
