use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::{Booking, UserType};
use crate::AppState;

use super::auth::AuthSession;
use super::error::ApiError;

/// Bookings made by the logged-in client
///
/// GET /api/clients/bookings
pub async fn client_bookings(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<Vec<Booking>>, ApiError> {
    auth.require(UserType::Client)?;
    Ok(Json(state.storage.bookings_by_client_id(auth.user_id())))
}
