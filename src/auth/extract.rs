use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use bson::oid::ObjectId;
use tracing::warn;

use crate::auth::claims::TokenKeys;
use crate::error::ApiError;
use crate::models::Role;

/// Request-scoped identity resolved from the bearer token. Extracting this
/// is the entire auth gate; role-based filtering stays in the handlers.
pub struct AuthUser {
    pub id: ObjectId,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        // The wire contract checks length only: anything shorter than
        // "Bearer x" is out. The scheme word itself is never inspected, and
        // the first 7 bytes are stripped by position.
        if header.len() < 8 {
            return Err(ApiError::unauthorized("Missing or invalid token"));
        }
        let token = &header[7..];

        let keys = TokenKeys::from_ref(state);
        let claims = keys.decode(token).map_err(|err| {
            warn!("rejected bearer token");
            ApiError::unauthorized(err.to_string())
        })?;

        // A token can verify and still carry an id that is not a usable
        // ObjectId; that is the same malformed-claims failure to callers.
        let id = ObjectId::parse_str(&claims.id)
            .map_err(|_| ApiError::unauthorized("Invalid token claims"))?;

        Ok(AuthUser {
            id,
            role: claims.role,
        })
    }
}
