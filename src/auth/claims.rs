use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::models::{Role, User};
use crate::state::AppState;

/// Identity claims carried inside a signed token. Decoding is strict: a
/// missing or ill-typed field (including an unknown role string) rejects the
/// whole token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Hex form of the user's ObjectId.
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Expiry as unix seconds.
    pub exp: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, structural garbage or expiry in the
    /// past. Deliberately carries no detail.
    #[error("Invalid token")]
    Invalid,
    /// The signature verified but the payload is not a usable claims set.
    #[error("Invalid token claims")]
    MalformedClaims,
}

/// HS256 signing/verification keys derived from one process-wide secret,
/// injected at construction. An empty secret is a degenerate but valid key.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &User) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + self.ttl;
        let claims = Claims {
            id: user.id.to_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %claims.id, "token issued");
        Ok(token)
    }

    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // The default 60s leeway would accept freshly-expired tokens.
        validation.leeway = 0;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => match err.kind() {
                ErrorKind::Json(_) => Err(TokenError::MalformedClaims),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        Self::new(&jwt.secret, Duration::hours(jwt.ttl_hours))
    }
}
