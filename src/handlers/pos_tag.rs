//! POST /pos_tag - Penn Treebank part-of-speech tags, one pair per token.

use axum::{Extension, Json};
use serde::Serialize;

use super::{record, TextRequest};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::service::{Pair, TextAnalyzer};

#[derive(Debug, Serialize)]
pub struct PosTagResponse {
    pub pos_tags: Vec<Pair>,
}

pub async fn pos_tag(
    Extension(analyzer): Extension<TextAnalyzer>,
    ValidJson(req): ValidJson<TextRequest>,
) -> Result<Json<PosTagResponse>, ApiError> {
    let pos_tags = record("pos_tag", analyzer.pos_tag(&req.text))?;
    Ok(Json(PosTagResponse { pos_tags }))
}
