//! POST /tokenize - split text into word tokens.

use axum::{Extension, Json};
use serde::Serialize;

use super::{record, TextRequest};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::service::TextAnalyzer;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub tokens: Vec<String>,
}

pub async fn tokenize(
    Extension(analyzer): Extension<TextAnalyzer>,
    ValidJson(req): ValidJson<TextRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = record("tokenize", analyzer.tokenize(&req.text))?;
    Ok(Json(TokenResponse { tokens }))
}
