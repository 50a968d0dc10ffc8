//! Shared helpers for the unit tests: request builders, body readers and
//! quick model constructors.

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Method, Request, Response},
};
use bson::oid::ObjectId;

use crate::auth::claims::TokenKeys;
use crate::models::{Project, Role, Team, User};
use crate::state::AppState;

pub fn user(name: &str, email: &str, role: Role) -> User {
    User {
        id: ObjectId::new(),
        name: name.into(),
        email: email.into(),
        password: String::new(),
        avatar: None,
        role,
    }
}

pub fn team(name: &str, members: Vec<ObjectId>) -> Team {
    Team {
        id: ObjectId::new(),
        name: name.into(),
        description: None,
        members,
        lead: None,
        created_at: bson::DateTime::now(),
    }
}

pub fn project(name: &str, teams: Vec<ObjectId>) -> Project {
    Project {
        id: ObjectId::new(),
        name: name.into(),
        description: None,
        start_date: None,
        end_date: None,
        teams,
        created_at: bson::DateTime::now(),
    }
}

/// A token the app under test will accept for this user.
pub fn token_for(state: &AppState, user: &User) -> String {
    TokenKeys::from_ref(state).issue(user).expect("issue token")
}

fn json_request(method: Method, uri: &str, body: serde_json::Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    json_request(Method::POST, uri, body, None)
}

pub fn post_json_with_token(uri: &str, body: serde_json::Value, token: &str) -> Request<Body> {
    json_request(Method::POST, uri, body, Some(token))
}

pub fn put_json_with_token(uri: &str, body: serde_json::Value, token: &str) -> Request<Body> {
    json_request(Method::PUT, uri, body, Some(token))
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is json")
}
