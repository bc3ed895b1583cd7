use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    errors::AppError,
    models::{CallerId, Claims},
    state::AppState,
};

/// Caller identity attached to a request, if any.
///
/// Extraction never rejects. A missing, malformed or expired token yields
/// `Caller(None)` and each handler decides whether identity is required.
pub struct Caller(pub Option<CallerId>);

impl<S> FromRequestParts<S> for Caller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Ok(Caller(None));
        };

        match verify_token(bearer.token(), &app_state.jwt_secret) {
            Ok(claims) => Ok(Caller(Some(CallerId(claims.sub)))),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                Ok(Caller(None))
            }
        }
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }

    Ok(token_data.claims)
}

pub fn issue_token(user_id: &str, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let expiration = (Utc::now() + ttl).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(AppError::JwtError)
}
