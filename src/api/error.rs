use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication failed")]
    Authentication,

    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Not authenticated - no session is present")]
    AuthorizationMissing,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Structured error body convention: `{"detail": [{"msg": ...}, ...]}`
#[derive(Debug, Deserialize)]
struct DetailBody {
    detail: Vec<DetailItem>,
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(default)]
    msg: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data.
    /// The cut is moved back to a char boundary so multibyte text never
    /// splits mid-character.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..end],
                body.len()
            )
        }
    }

    /// Join the `msg` fields of a structured `detail` error body with "; ".
    /// Returns None when the body does not follow the convention.
    pub fn join_detail(body: &str) -> Option<String> {
        let parsed: DetailBody = serde_json::from_str(body).ok()?;
        let msgs: Vec<String> = parsed.detail.into_iter().filter_map(|d| d.msg).collect();
        if msgs.is_empty() {
            None
        } else {
            Some(msgs.join("; "))
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::join_detail(body);
        match status.as_u16() {
            400 | 422 => {
                ApiError::Validation(detail.unwrap_or_else(|| Self::truncate_body(body)))
            }
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(detail.unwrap_or_else(|| Self::truncate_body(body))),
            404 => ApiError::NotFound(Self::truncate_body(body)),
            500..=599 => ApiError::ServerError(Self::truncate_body(body)),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, Self::truncate_body(body))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_join_detail_multiple_messages() {
        let body = r#"{"detail": [{"msg": "Project name exists"}, {"msg": "csv field required"}]}"#;
        assert_eq!(
            ApiError::join_detail(body).as_deref(),
            Some("Project name exists; csv field required")
        );
    }

    #[test]
    fn test_join_detail_ignores_items_without_msg() {
        let body = r#"{"detail": [{"loc": ["body", "csv"]}, {"msg": "csv field required"}]}"#;
        assert_eq!(ApiError::join_detail(body).as_deref(), Some("csv field required"));
    }

    #[test]
    fn test_join_detail_rejects_unstructured_bodies() {
        assert_eq!(ApiError::join_detail("Internal Server Error"), None);
        assert_eq!(ApiError::join_detail(r#"{"detail": "plain string"}"#), None);
        assert_eq!(ApiError::join_detail(r#"{"detail": []}"#), None);
    }

    #[test]
    fn test_from_status_maps_validation_detail() {
        let body = r#"{"detail": [{"msg": "Project name exists"}]}"#;
        match ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body) {
            ApiError::Validation(msg) => assert_eq!(msg, "Project name exists"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_from_status_unauthorized() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // An accented character straddling the truncation offset must not panic
        let body = format!("{}éé", "x".repeat(MAX_ERROR_BODY_LENGTH - 1));
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::ServerError(msg) => {
                assert!(msg.contains("truncated"));
                assert!(!msg.contains('\u{FFFD}'));
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }

        let body = "é".repeat(MAX_ERROR_BODY_LENGTH);
        match ApiError::from_status(StatusCode::BAD_GATEWAY, &body) {
            ApiError::ServerError(msg) => assert!(msg.contains("truncated")),
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn test_from_status_server_error_truncates_body() {
        let body = "x".repeat(2000);
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::ServerError(msg) => {
                assert!(msg.len() < 600);
                assert!(msg.contains("truncated"));
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }
}
