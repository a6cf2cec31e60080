//! Request body extraction with errors in the API envelope.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use super::error::ApiError;

/// A JSON request body, left untyped so the validators can report every
/// failing field instead of stopping at the first serde error.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}
