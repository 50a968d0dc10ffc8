use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::auth::claims::TokenKeys;
use crate::auth::dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest};
use crate::auth::extract::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::models::{Role, User};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(profile))
        .route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request(
            "Name, email, and password are required",
        ));
    }

    if state
        .store
        .find_user_by_email(&payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::bad_request("Email already registered"));
    }

    let user = User {
        id: ObjectId::new(),
        name: payload.name,
        email: payload.email,
        password: hash_password(&payload.password)?,
        avatar: None,
        role: Role::Member,
    };
    state.store.insert_user(&user).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&payload.password, &user.password)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = TokenKeys::from_ref(&state).issue(&user)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, auth))]
async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .store
        .find_user_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
