//! GET /health

use axum::{Extension, Json};
use serde::Serialize;

use crate::service::TextAnalyzer;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

pub async fn health(Extension(analyzer): Extension<TextAnalyzer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: analyzer.model_name().to_string(),
    })
}
