use axum::Router;

use crate::state::AppState;

pub mod aggregate;
pub mod dto;
mod handlers;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
