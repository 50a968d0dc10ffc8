use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use bson::oid::ObjectId;
use serde_json::{json, Value};
use time::macros::format_description;
use tracing::{info, instrument};

use crate::auth::extract::AuthUser;
use crate::error::ApiError;
use crate::models::Project;
use crate::projects::aggregate::aggregate;
use crate::projects::dto::{ProjectPayload, ProjectResponse, ProjectSummary, ProjectView};
use crate::state::AppState;
use crate::store::ProjectPatch;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects-with-team", get(list_projects_bare))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

fn parse_project_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request("Invalid project id"))
}

/// `YYYY-MM-DD` at UTC midnight; anything else degrades to absent.
fn parse_date(value: &str) -> Option<bson::DateTime> {
    let format = format_description!("[year]-[month]-[day]");
    let date = time::Date::parse(value, format).ok()?;
    Some(bson::DateTime::from_time_0_3(date.midnight().assume_utc()))
}

#[instrument(skip(state, _auth))]
async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ProjectView>>, ApiError> {
    let projects = state.store.list_projects().await?;
    let views = aggregate(state.store.as_ref(), projects).await;
    Ok(Json(views))
}

#[instrument(skip(state, _auth))]
async fn list_projects_bare(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    let projects = state.store.list_projects().await?;
    Ok(Json(
        projects.into_iter().map(ProjectSummary::from).collect(),
    ))
}

#[instrument(skip(state, _auth))]
async fn get_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = parse_project_id(&id)?;
    let project = state
        .store
        .find_project_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    Ok(Json(project.into()))
}

#[instrument(skip(state, _auth, payload))]
async fn create_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = Project {
        id: ObjectId::new(),
        teams: payload.team_ids().unwrap_or_default(),
        start_date: parse_date(&payload.start_date),
        end_date: parse_date(&payload.end_date),
        name: payload.name,
        description: payload.description,
        created_at: bson::DateTime::now(),
    };
    state.store.insert_project(&project).await?;
    info!(project_id = %project.id, "project created");
    Ok(Json(project.into()))
}

#[instrument(skip(state, _auth, payload))]
async fn update_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_project_id(&id)?;
    let patch = ProjectPatch {
        teams: payload.team_ids(),
        start_date: parse_date(&payload.start_date),
        end_date: parse_date(&payload.end_date),
        name: payload.name,
        description: payload.description,
    };
    state.store.update_project(id, patch).await?;
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state, _auth))]
async fn delete_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_project_id(&id)?;
    state.store.delete_project(id).await?;
    info!(project_id = %id, "project deleted");
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::parse_date;
    use crate::app::build_app;
    use crate::models::Role;
    use crate::state::AppState;
    use crate::store::memory::MemStore;
    use crate::store::Store;
    use crate::testutil::{
        body_json, get_with_token, post_json_with_token, team, token_for, user,
    };

    #[test]
    fn date_parsing_is_lenient() {
        let parsed = parse_date("2024-03-01").expect("valid date");
        assert_eq!(
            parsed.to_time_0_3().to_string(),
            "2024-03-01 0:00:00.0 +00:00:00"
        );
        assert!(parse_date("").is_none());
        assert!(parse_date("03/01/2024").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }

    #[tokio::test]
    async fn listing_resolves_teams_and_members() {
        let store = Arc::new(MemStore::default());
        let state = AppState::for_tests(store.clone());
        let manager = user("Boss", "boss@example.com", Role::Manager);
        let member = user("Dev", "dev@example.com", Role::Member);
        store.insert_user(&manager).await.unwrap();
        store.insert_user(&member).await.unwrap();

        let squad = team("squad", vec![member.id]);
        store.insert_team(&squad).await.unwrap();

        let token = token_for(&state, &manager);
        let app = build_app(state);

        let res = app
            .clone()
            .oneshot(post_json_with_token(
                "/api/projects",
                serde_json::json!({
                    "name": "apollo",
                    "startDate": "2024-01-15",
                    "endDate": "not-a-date",
                    "teams": [squad.id.to_hex()],
                }),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let created = body_json(res).await;
        assert_eq!(created["startDate"], "2024-01-15T00:00:00Z");
        assert!(created.get("endDate").is_none());

        let res = app
            .clone()
            .oneshot(get_with_token("/api/projects", &token))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let listing = body_json(res).await;
        assert_eq!(listing[0]["name"], "apollo");
        assert_eq!(listing[0]["teams"][0]["name"], "squad");
        assert_eq!(
            listing[0]["teams"][0]["members"][0]["email"],
            "dev@example.com"
        );

        let res = app
            .oneshot(get_with_token("/api/projects-with-team", &token))
            .await
            .unwrap();
        let bare = body_json(res).await;
        assert_eq!(bare[0]["name"], "apollo");
        assert!(bare[0].get("teams").is_none());
    }

    #[tokio::test]
    async fn listing_requires_auth() {
        let state = AppState::for_tests(Arc::new(MemStore::default()));
        let app = build_app(state);
        let res = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/projects")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await["error"], "Missing or invalid token");
    }
}
