use axum::response::{IntoResponse, Response};

use super::ErrorObject;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    ErrorObject::new(404, "not_found", "The requested resource was not found").into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    ErrorObject::new(
        405,
        "method_not_allowed",
        "The HTTP method is not allowed for this resource",
    )
    .into_response()
}
