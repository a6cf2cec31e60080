//! Booking requests from the public site

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::{Booking, UserType};
use crate::AppState;

use super::auth::AuthSession;
use super::error::ApiError;
use super::extract::JsonBody;
use super::validation::validate_booking;

/// Create a booking. A logged-in client becomes the booking's owner.
///
/// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    auth: Option<AuthSession>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = validate_booking(&body)?;

    let client_user_id = auth
        .filter(|a| a.session.user_type == UserType::Client)
        .map(|a| a.user_id());

    let booking = state.storage.create_booking(booking, client_user_id);

    info!(
        booking_id = booking.id,
        category = %booking.service_category,
        provider_id = ?booking.provider_id,
        "Booking received"
    );

    Ok((StatusCode::CREATED, Json(booking)))
}
