//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor that rejects undecodable or invalid payloads with a 400.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        value.validate().map_err(|errors| {
            // Report the first failing field only
            let message = errors
                .field_errors()
                .into_iter()
                .next()
                .and_then(|(field, errors)| {
                    errors
                        .first()
                        .and_then(|error| error.message.as_ref())
                        .map(|msg| format!("{field}: {msg}"))
                })
                .unwrap_or_else(|| "Validation failed".to_string());
            AppError::validation(message)
        })?;

        Ok(ValidatedJson(value))
    }
}
