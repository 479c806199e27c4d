//! POST /ner - named entities as (text, label) pairs.

use axum::{Extension, Json};
use serde::Serialize;

use super::{record, TextRequest};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::service::{Pair, TextAnalyzer};

#[derive(Debug, Serialize)]
pub struct NerResponse {
    pub entities: Vec<Pair>,
}

pub async fn ner(
    Extension(analyzer): Extension<TextAnalyzer>,
    ValidJson(req): ValidJson<TextRequest>,
) -> Result<Json<NerResponse>, ApiError> {
    let entities = record("ner", analyzer.ner(&req.text))?;
    Ok(Json(NerResponse { entities }))
}
