//! Query string extractor with automatic validation.

use crate::errors::ErrorObject;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validation_human_message;

/// Query extractor with automatic validation.
///
/// Deserializes the query string and validates it. Out-of-range or
/// unparseable parameters are rejected with a `validation.error` response
/// rather than silently clamped.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedQuery;
///
/// async fn list(ValidatedQuery(query): ValidatedQuery<PageQuery>) { /* ... */ }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::info!("Query extraction failed: {}", e.body_text());
                ErrorObject::validation(e.body_text()).into_response()
            })?;

        data.validate().map_err(|e| {
            let human_message = validation_human_message(&e);
            tracing::info!("Query validation failed: {}", human_message);
            ErrorObject::validation(human_message).into_response()
        })?;

        Ok(ValidatedQuery(data))
    }
}
