use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use bson::oid::ObjectId;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::auth::extract::AuthUser;
use crate::error::ApiError;
use crate::models::Team;
use crate::state::AppState;
use crate::store::TeamPatch;
use crate::teams::dto::{TeamPayload, TeamResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/:id",
            get(get_team).put(update_team).delete(delete_team),
        )
}

fn parse_team_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request("Invalid team id"))
}

#[instrument(skip(state, _auth))]
async fn list_teams(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = state.store.list_teams().await?;
    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

#[instrument(skip(state, _auth))]
async fn get_team(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_team_id(&id)?;
    let team = state
        .store
        .find_team_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;
    Ok(Json(team.into()))
}

#[instrument(skip(state, _auth, payload))]
async fn create_team(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = Team {
        id: ObjectId::new(),
        members: payload.member_ids(),
        lead: payload.lead_id(),
        name: payload.name,
        description: payload.description,
        created_at: bson::DateTime::now(),
    };
    state.store.insert_team(&team).await?;
    info!(team_id = %team.id, "team created");
    Ok(Json(team.into()))
}

#[instrument(skip(state, _auth, payload))]
async fn update_team(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_team_id(&id)?;
    let patch = TeamPatch {
        members: payload.member_ids(),
        lead: payload.lead_id(),
        name: payload.name,
        description: payload.description,
    };
    state.store.update_team(id, patch).await?;
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state, _auth))]
async fn delete_team(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_team_id(&id)?;
    state.store.delete_team(id).await?;
    info!(team_id = %id, "team deleted");
    Ok(Json(json!({ "success": true })))
}
