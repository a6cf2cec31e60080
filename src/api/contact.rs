//! Contact form submissions

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::ContactReceipt;
use crate::AppState;

use super::error::ApiError;
use super::extract::JsonBody;
use super::validation::validate_contact;

/// Store a contact message and acknowledge it
///
/// POST /api/contact
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ContactReceipt>), ApiError> {
    let message = state.storage.create_contact_message(validate_contact(&body)?);
    info!(message_id = message.id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(ContactReceipt {
            success: true,
            message: "Contact message sent successfully".to_string(),
            id: message.id,
        }),
    ))
}
