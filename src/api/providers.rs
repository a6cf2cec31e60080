//! Provider profile management and the provider's booking list.
//!
//! Every handler here requires a session whose user registered as a
//! provider; other roles get 403.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::{Booking, ServiceProvider, UserType};
use crate::AppState;

use super::auth::AuthSession;
use super::error::ApiError;
use super::extract::JsonBody;
use super::validation::{validate_provider_profile, validate_provider_update};

fn own_profile(state: &AppState, auth: &AuthSession) -> Result<ServiceProvider, ApiError> {
    auth.require(UserType::Provider)?;
    state
        .storage
        .get_service_provider_by_user_id(auth.user_id())
        .ok_or_else(|| ApiError::not_found("Provider profile not found"))
}

/// Get the caller's provider profile
///
/// GET /api/providers/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<ServiceProvider>, ApiError> {
    own_profile(&state, &auth).map(Json)
}

/// Create the caller's provider profile. One profile per user.
///
/// POST /api/providers/profile
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ServiceProvider>), ApiError> {
    auth.require(UserType::Provider)?;
    let profile = validate_provider_profile(&body)?;

    let provider = state
        .storage
        .create_service_provider(profile, auth.user_id())?;

    info!(
        provider_id = provider.id,
        user_id = provider.user_id,
        "Provider profile created"
    );

    Ok((StatusCode::CREATED, Json(provider)))
}

/// Partially update the caller's provider profile
///
/// PATCH /api/providers/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    JsonBody(body): JsonBody,
) -> Result<Json<ServiceProvider>, ApiError> {
    let existing = own_profile(&state, &auth)?;
    let update = validate_provider_update(&body)?;

    let provider = state
        .storage
        .update_service_provider(existing.id, update)
        .ok_or_else(|| ApiError::not_found("Provider profile not found"))?;

    info!(provider_id = provider.id, "Provider profile updated");
    Ok(Json(provider))
}

/// Bookings addressed to the caller's provider profile
///
/// GET /api/providers/bookings
pub async fn provider_bookings(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let provider = own_profile(&state, &auth)?;
    Ok(Json(state.storage.bookings_by_provider_id(provider.id)))
}
