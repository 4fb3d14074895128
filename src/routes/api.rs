use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use chrono::Local;
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::OrderFormDraft;
use crate::forms::clients::CreateClientForm;
use crate::forms::profile::UpdateProfileForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{
    ServiceError, clients as clients_service, drafts as drafts_service,
    profiles as profiles_service,
};
use crate::wizard::validation::validate_with_policy;

#[get("/v1/status")]
pub async fn status(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let storage = if repo.is_configured() {
        "available"
    } else {
        "unavailable"
    };
    HttpResponse::Ok().json(json!({
        "storage": storage,
        "validationPolicy": server_config.validation_policy,
    }))
}

#[get("/v1/draft")]
pub async fn get_draft(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match drafts_service::load_draft(repo.get_ref(), &user) {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(err) => error_response(&err),
    }
}

#[put("/v1/draft")]
pub async fn save_draft(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(draft): web::Json<OrderFormDraft>,
) -> impl Responder {
    match drafts_service::save_draft(repo.get_ref(), &user, &draft) {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(err) => error_response(&err),
    }
}

#[delete("/v1/draft")]
pub async fn delete_draft(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match drafts_service::delete_draft(repo.get_ref(), &user) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

/// Runs the validator without storing anything.
#[post("/v1/draft/validate")]
pub async fn validate_draft(
    server_config: web::Data<ServerConfig>,
    web::Json(draft): web::Json<OrderFormDraft>,
) -> impl Responder {
    let errors = validate_with_policy(
        &draft,
        Local::now().date_naive(),
        server_config.validation_policy,
    );
    HttpResponse::Ok().json(json!({
        "valid": errors.is_empty(),
        "errors": errors,
    }))
}

#[get("/v1/clients")]
pub async fn list_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match clients_service::list_clients(repo.get_ref(), &user) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(err) => error_response(&err),
    }
}

fn form_rejected(form: &CreateClientForm, err: &ServiceError) -> HttpResponse {
    let fields: serde_json::Map<String, serde_json::Value> = form
        .field_errors()
        .into_iter()
        .map(|(field, message)| (field, message.into()))
        .collect();
    HttpResponse::UnprocessableEntity().json(json!({
        "error": err.to_string(),
        "fields": fields,
    }))
}

#[post("/v1/clients")]
pub async fn create_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateClientForm>,
) -> impl Responder {
    match clients_service::create_client(repo.get_ref(), &user, &form) {
        Ok(client) => HttpResponse::Created().json(client),
        Err(err @ ServiceError::Form(_)) => form_rejected(&form, &err),
        Err(err) => error_response(&err),
    }
}

#[put("/v1/clients/{client_id}")]
pub async fn update_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    client_id: web::Path<i32>,
    web::Json(form): web::Json<CreateClientForm>,
) -> impl Responder {
    match clients_service::update_client(repo.get_ref(), &user, client_id.into_inner(), &form) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err @ ServiceError::Form(_)) => form_rejected(&form, &err),
        Err(err) => error_response(&err),
    }
}

#[delete("/v1/clients/{client_id}")]
pub async fn delete_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    client_id: web::Path<i32>,
) -> impl Responder {
    match clients_service::delete_client(repo.get_ref(), &user, client_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

#[get("/v1/profile")]
pub async fn get_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match profiles_service::get_profile(repo.get_ref(), &user) {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => error_response(&ServiceError::NotFound),
        Err(err) => error_response(&err),
    }
}

#[put("/v1/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateProfileForm>,
) -> impl Responder {
    match profiles_service::update_profile(repo.get_ref(), &user, &form) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(&err),
    }
}

/// Called by the UI right after sign-up or an OAuth redirect.
#[post("/v1/profile/sync")]
pub async fn sync_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match profiles_service::sync_profile(repo.get_ref(), &user, None) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(&err),
    }
}
