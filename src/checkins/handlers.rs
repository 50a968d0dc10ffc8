use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bson::oid::ObjectId;
use time::{Duration, OffsetDateTime, Time};
use tracing::{info, instrument};

use crate::auth::extract::AuthUser;
use crate::checkins::dto::{CheckinResponse, CreateCheckinRequest};
use crate::error::ApiError;
use crate::models::{Checkin, CheckinStatus};
use crate::state::AppState;
use crate::store::CheckinFilter;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkins", get(list_checkins).post(create_checkin))
        .route("/checkins/today", get(todays_checkins))
}

/// Managerial roles get the unfiltered collection; everyone else only their
/// own documents. This is a handler decision, applied after the auth gate.
#[instrument(skip(state, auth))]
async fn list_checkins(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CheckinResponse>>, ApiError> {
    let filter = if auth.role.sees_all_checkins() {
        CheckinFilter::default()
    } else {
        CheckinFilter {
            user_id: Some(auth.id),
            ..Default::default()
        }
    };
    let checkins = state.store.list_checkins(filter).await?;
    Ok(Json(
        checkins.into_iter().map(CheckinResponse::from).collect(),
    ))
}

#[instrument(skip(state, auth, payload))]
async fn create_checkin(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCheckinRequest>,
) -> Result<(StatusCode, Json<CheckinResponse>), ApiError> {
    let checkin = Checkin {
        id: ObjectId::new(),
        user_id: auth.id,
        kind: payload.kind,
        mood: payload.mood,
        selfie_url: payload.selfie_image,
        description: payload.description,
        created_at: bson::DateTime::now(),
        face_result: payload.face_data,
        status: CheckinStatus::Present,
    };
    state.store.insert_checkin(&checkin).await?;
    info!(checkin_id = %checkin.id, user_id = %auth.id, "checkin recorded");
    Ok((StatusCode::CREATED, Json(checkin.into())))
}

#[instrument(skip(state, auth))]
async fn todays_checkins(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CheckinResponse>>, ApiError> {
    let start = OffsetDateTime::now_utc().replace_time(Time::MIDNIGHT);
    let end = start + Duration::days(1);
    let filter = CheckinFilter {
        user_id: Some(auth.id),
        created_within: Some((
            bson::DateTime::from_time_0_3(start),
            bson::DateTime::from_time_0_3(end),
        )),
    };
    let checkins = state.store.list_checkins(filter).await?;
    Ok(Json(
        checkins.into_iter().map(CheckinResponse::from).collect(),
    ))
}
