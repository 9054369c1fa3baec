pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response body.
///
/// Every error leaving the API uses this shape:
/// - `code`: HTTP status code, repeated in the body for clients that only
///   look at the payload
/// - `message`: stable symbolic identifier (e.g. `task.not_found`) intended
///   for programmatic handling; never shown to end users
/// - `humanMessage`: human-readable description safe to display
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 400,
///   "message": "task.not_found",
///   "humanMessage": "Task not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorObject {
    /// HTTP status code
    pub code: u16,
    /// Stable symbolic error identifier
    pub message: String,
    /// Human-readable error message
    #[serde(rename = "humanMessage")]
    pub human_message: String,
}

impl ErrorObject {
    pub fn new(code: u16, message: impl Into<String>, human_message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            human_message: human_message.into(),
        }
    }

    /// Validation failure (400, `validation.error`).
    pub fn validation(human_message: impl Into<String>) -> Self {
        Self::new(400, "validation.error", human_message)
    }

    /// Unexpected failure (500, `internal.error`). The internal detail is
    /// logged by the caller, never put in the body.
    pub fn internal() -> Self {
        Self::new(500, "internal.error", "Something went wrong...")
    }

    fn status(&self) -> StatusCode {
        // from_u16 accepts up to 999; only real HTTP statuses pass through
        match self.code {
            100..=599 => {
                StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorObject {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_human_message_in_camel_case() {
        let error = ErrorObject::new(400, "task.not_found", "Task not found: 7");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["code"], 400);
        assert_eq!(json["message"], "task.not_found");
        assert_eq!(json["humanMessage"], "Task not found: 7");
    }

    #[test]
    fn test_internal_error_hides_details() {
        let error = ErrorObject::internal();
        assert_eq!(error.code, 500);
        assert_eq!(error.message, "internal.error");
        assert_eq!(error.human_message, "Something went wrong...");
    }

    #[test]
    fn test_response_status_follows_code() {
        let response = ErrorObject::validation("size must be at least 1").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_code_falls_back_to_500() {
        let response = ErrorObject::new(999, "weird", "weird").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ErrorObject::new(42, "weird", "weird").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
