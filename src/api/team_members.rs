use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::db::TeamMember;
use crate::AppState;

use super::error::ApiError;
use super::validation::parse_id;

/// GET /api/team-members
pub async fn list_team_members(State(state): State<Arc<AppState>>) -> Json<Vec<TeamMember>> {
    Json(state.storage.list_team_members())
}

/// GET /api/team-members/:id
pub async fn get_team_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamMember>, ApiError> {
    let id = parse_id(&id, "team member")?;
    state
        .storage
        .get_team_member(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Team member not found"))
}
