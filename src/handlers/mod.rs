//! HTTP handlers, one module per endpoint.

pub mod health;
pub mod ner;
pub mod pos_tag;
pub mod tokenize;

use serde::Deserialize;

use crate::error::ApiError;
use crate::language::LanguageError;

/// Request body shared by the text endpoints. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Log the outcome of an analysis call and map failures to a generic 500.
pub(crate) fn record<T>(
    endpoint: &'static str,
    result: Result<Vec<T>, LanguageError>,
) -> Result<Vec<T>, ApiError> {
    match result {
        Ok(items) => {
            tracing::info!(endpoint, count = items.len(), "request succeeded");
            Ok(items)
        }
        Err(source) => {
            tracing::error!(endpoint, error = %source, "request failed");
            Err(ApiError::Processing { endpoint, source })
        }
    }
}
