//! API handlers for customer reviews

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::db::Review;
use crate::AppState;

use super::error::ApiError;
use super::extract::JsonBody;
use super::validation::{parse_id, validate_review};

/// List all reviews
///
/// GET /api/reviews
pub async fn list_reviews(State(state): State<Arc<AppState>>) -> Json<Vec<Review>> {
    Json(state.storage.list_reviews())
}

/// Get a review by ID
///
/// GET /api/reviews/:id
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    let id = parse_id(&id, "review")?;
    state
        .storage
        .get_review(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Review not found"))
}

/// Reviews left for one service
///
/// GET /api/reviews/service/:serviceId
pub async fn reviews_by_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let service_id = parse_id(&service_id, "service")?;
    Ok(Json(state.storage.reviews_by_service_id(service_id)))
}

/// Submit a review. The service reference is not checked.
///
/// POST /api/reviews
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state.storage.create_review(validate_review(&body)?);
    info!(review_id = review.id, service_id = review.service_id, rating = review.rating, "Review created");
    Ok((StatusCode::CREATED, Json(review)))
}
