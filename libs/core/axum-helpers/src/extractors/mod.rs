//! Custom Axum extractors with structured error responses.

mod validated_json;
mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;

use validator::ValidationErrors;

/// Flattens validator errors into a single human-readable message,
/// e.g. `"title: must not be blank; size: must be between 1 and 100"`.
pub(crate) fn validation_human_message(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let detail = field_errors
                .iter()
                .filter_map(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            if detail.is_empty() {
                format!("{}: invalid value", field)
            } else {
                format!("{}: {}", field, detail)
            }
        })
        .collect();

    // Field order from the derive is not stable
    parts.sort();

    if parts.is_empty() {
        "Validation error".to_string()
    } else {
        parts.join("; ")
    }
}
