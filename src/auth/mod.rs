use axum::Router;

use crate::state::AppState;

pub mod claims;
mod dto;
pub mod extract;
mod handlers;
mod password;

pub use dto::PublicUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::user_routes())
}
