//! API handlers for the service catalogue

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::db::Service;
use crate::AppState;

use super::error::ApiError;
use super::validation::parse_id;

/// List all services
///
/// GET /api/services
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.storage.list_services())
}

/// Get a service by ID
///
/// GET /api/services/:id
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id, "service")?;
    state
        .storage
        .get_service(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Service not found"))
}

/// Services in a category. Unknown categories yield an empty list.
///
/// GET /api/services/category/:category
pub async fn services_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<Vec<Service>> {
    Json(state.storage.services_by_category(&category))
}

/// GET /api/services/popular
pub async fn popular_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.storage.popular_services())
}

/// GET /api/services/new
pub async fn new_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.storage.new_services())
}
