//! API error type and its HTTP mapping.
//!
//! | Variant      | Status | Body                                   |
//! |--------------|--------|----------------------------------------|
//! | `Validation` | 422    | `{"detail": [ValidationIssue, ...]}`   |
//! | `Body`       | 4xx    | axum's rejection (e.g. 413 too large)  |
//! | `Processing` | 500    | `{"detail": "Internal Server Error"}`  |
//!
//! Processing errors never leak their source to the client; the handlers log
//! it before returning.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::language::LanguageError;

/// Message returned for every processing failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// One field-level problem with a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path to the offending value, starting with "body".
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    pub fn new<L, S>(loc: L, msg: impl Into<String>, kind: impl Into<String>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request validation failed: {0:?}")]
    Validation(Vec<ValidationIssue>),

    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("{endpoint} failed: {source}")]
    Processing {
        endpoint: &'static str,
        #[source]
        source: LanguageError,
    },
}

#[derive(Serialize)]
struct ValidationBody {
    detail: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct MessageBody {
    detail: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody { detail }),
            )
                .into_response(),
            ApiError::Body(rejection) => rejection.into_response(),
            ApiError::Processing { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    detail: INTERNAL_ERROR_MESSAGE,
                }),
            )
                .into_response(),
        }
    }
}
