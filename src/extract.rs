//! JSON body extractor with field-level validation errors.
//!
//! axum's `Json` rejects bad bodies with a plain-text message and a mix of
//! 400/415/422 statuses. `ValidJson` reports every malformed body as 422 with
//! a `detail` list naming the offending field where serde exposes it.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::Value;

use crate::error::{ApiError, ValidationIssue};

/// Deserialized JSON request body.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Validation(vec![issue_from_serde(&e)]))?;

        // serde also accepts a struct written as a JSON array
        if !value.is_object() {
            return Err(ApiError::Validation(vec![not_an_object()]));
        }
        serde_json::from_value(value)
            .map(ValidJson)
            .map_err(|e| ApiError::Validation(vec![issue_from_serde(&e)]))
    }
}

fn not_an_object() -> ValidationIssue {
    ValidationIssue::new(
        ["body"],
        "Input should be a valid dictionary or object to extract fields from",
        "model_attributes_type",
    )
}

/// Translate a serde_json error into a validation issue.
pub fn issue_from_serde(err: &serde_json::Error) -> ValidationIssue {
    let full = err.to_string();
    // Drop serde_json's " at line L column C" suffix
    let msg = full.split(" at line ").next().unwrap_or(&full);

    match err.classify() {
        Category::Data => match missing_field(msg) {
            Some(field) => ValidationIssue::new(["body", field], "Field required", "missing"),
            None => ValidationIssue::new(["body"], msg, "value_error"),
        },
        Category::Syntax | Category::Eof | Category::Io => ValidationIssue::new(
            ["body"],
            format!("JSON decode error: {msg}"),
            "json_invalid",
        ),
    }
}

fn missing_field(msg: &str) -> Option<&str> {
    msg.strip_prefix("missing field `")?.strip_suffix('`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Body {
        text: String,
    }

    fn issue(json: &str) -> ValidationIssue {
        let err = serde_json::from_str::<Body>(json).unwrap_err();
        issue_from_serde(&err)
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            issue(r#"{"txt": "hi"}"#),
            ValidationIssue::new(["body", "text"], "Field required", "missing")
        );
    }

    #[test]
    fn test_wrong_type() {
        let bad = issue(r#"{"text": 5}"#);
        assert_eq!(bad.loc, vec!["body"]);
        assert_eq!(bad.kind, "value_error");
        assert!(bad.msg.starts_with("invalid type: integer `5`"));
        assert!(!bad.msg.contains("line"));
    }

    #[test]
    fn test_missing_field_from_value() {
        let err = serde_json::from_value::<Body>(serde_json::json!({"txt": "hi"})).unwrap_err();
        assert_eq!(
            issue_from_serde(&err),
            ValidationIssue::new(["body", "text"], "Field required", "missing")
        );
    }

    #[test]
    fn test_invalid_json() {
        let bad = issue("{not json");
        assert_eq!(bad.kind, "json_invalid");
        assert!(bad.msg.starts_with("JSON decode error"));
        assert_eq!(issue("").kind, "json_invalid");
    }
}
