//! JSON API handlers.

use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod api;
pub mod auth;

/// Maps a service failure onto a JSON error response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::NotConfigured => HttpResponse::ServiceUnavailable().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        ServiceError::Transport { .. } => HttpResponse::InternalServerError().json(body),
    }
}
