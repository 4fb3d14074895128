//! Bearer-token authentication against the identity provider's HS256 tokens.

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::json;
use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("server configuration is unavailable")]
    MissingConfig,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthError::MissingConfig => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Decodes and verifies a token, including its expiry.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AuthError> {
    let data = decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

/// Signs claims the way the identity provider does. Used by local tooling
/// and tests.
pub fn encode_token(user: &AuthenticatedUser, secret: &str) -> Result<String, AuthError> {
    Ok(encode(
        &Header::new(Algorithm::HS256),
        user,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is not registered as app data");
            return ready(Err(AuthError::MissingConfig));
        };
        let Some(token) = bearer_token(req) else {
            return ready(Err(AuthError::MissingToken));
        };

        ready(decode_token(token, &config.jwt_secret).map_err(|err| {
            log::warn!("Rejected bearer token: {err}");
            err
        }))
    }
}
