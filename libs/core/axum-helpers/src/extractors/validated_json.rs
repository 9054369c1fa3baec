//! JSON extractor with automatic validation using the validator crate.

use crate::errors::ErrorObject;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validation_human_message;

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate` trait.
/// Malformed JSON and failed validations both produce a `validation.error`
/// response, so clients see a single error shape for all bad input.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateTask {
///     #[validate(length(min = 1, max = 255))]
///     title: String,
/// }
///
/// async fn create_task(ValidatedJson(payload): ValidatedJson<CreateTask>) -> String {
///     format!("Creating task: {}", payload.title)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::info!("JSON extraction failed: {}", e.body_text());
            ErrorObject::validation(e.body_text()).into_response()
        })?;

        data.validate().map_err(|e| {
            let human_message = validation_human_message(&e);
            tracing::info!("Request validation failed: {}", human_message);
            ErrorObject::validation(human_message).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
