use actix_web::{App, http::StatusCode, http::header, test, web};
use apostille_intake::configure_api;
use apostille_intake::domain::auth::AuthenticatedUser;
use apostille_intake::domain::order::OrderFormDraft;
use apostille_intake::domain::profile::AuthProvider;
use apostille_intake::models::config::ServerConfig;
use apostille_intake::repository::DieselRepository;
use apostille_intake::routes::auth::encode_token;
use apostille_intake::wizard::ValidationPolicy;
use chrono::Utc;
use serde_json::{Value, json};

mod common;

const SECRET: &str = "test-secret";

fn server_config(policy: ValidationPolicy) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        jwt_secret: SECRET.to_string(),
        allowed_origins: Vec::new(),
        validation_policy: policy,
    }
}

fn bearer(sub: &str) -> (header::HeaderName, String) {
    let user = AuthenticatedUser {
        sub: sub.to_string(),
        email: "jane@example.com".to_string(),
        name: Some("Jane Doe".to_string()),
        picture: None,
        provider: AuthProvider::Email,
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode_token(&user, SECRET).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! init_app {
    ($repo:expr, $policy:expr) => {
        test::init_service(
            App::new()
                .configure(configure_api)
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(server_config($policy))),
        )
        .await
    };
}

#[actix_web::test]
async fn draft_requires_a_bearer_token() {
    let app = init_app!(DieselRepository::unavailable(), ValidationPolicy::Lenient);

    let req = test::TestRequest::get().uri("/api/v1/draft").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/draft")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_storage_answers_service_unavailable() {
    let app = init_app!(DieselRepository::unavailable(), ValidationPolicy::Lenient);

    let req = test::TestRequest::get()
        .uri("/api/v1/clients")
        .insert_header(bearer("user-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let req = test::TestRequest::get().uri("/api/v1/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["storage"], "unavailable");
    assert_eq!(body["validationPolicy"], "lenient");
}

#[actix_web::test]
async fn validate_reports_missing_fields_without_auth() {
    let app = init_app!(DieselRepository::unavailable(), ValidationPolicy::Lenient);

    let req = test::TestRequest::post()
        .uri("/api/v1/draft/validate")
        .set_json(OrderFormDraft::default())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["valid"], false);
    assert!(body["errors"]["primaryContact.name"].is_string());
    assert!(body["errors"]["dateNeeded"].is_string());
}

#[actix_web::test]
async fn draft_put_then_get_returns_the_same_document() {
    let test_db = common::TestDb::new("routes_draft_put_then_get.db");
    let app = init_app!(test_db.repo(), ValidationPolicy::Lenient);

    let req = test::TestRequest::get()
        .uri("/api/v1/draft")
        .insert_header(bearer("user-1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, Value::Null);

    let mut draft = OrderFormDraft::default();
    draft.primary_contact.name = "Jane Doe".to_string();
    draft.special_instructions = "Rush".to_string();

    let req = test::TestRequest::put()
        .uri("/api/v1/draft")
        .insert_header(bearer("user-1"))
        .set_json(&draft)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/draft")
        .insert_header(bearer("user-1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["form_data"], serde_json::to_value(&draft).unwrap());

    let req = test::TestRequest::get()
        .uri("/api/v1/draft")
        .insert_header(bearer("user-2"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn invalid_client_form_returns_field_errors() {
    let test_db = common::TestDb::new("routes_invalid_client_form.db");
    let app = init_app!(test_db.repo(), ValidationPolicy::Lenient);

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(bearer("user-1"))
        .set_json(json!({ "fullName": "", "officeEmail": "broken" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["fullName"].is_string());
    assert!(body["fields"]["officeEmail"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(bearer("user-1"))
        .set_json(json!({ "fullName": "Randy Dias", "website": "dias.example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn profile_sync_creates_profile_from_token() {
    let test_db = common::TestDb::new("routes_profile_sync.db");
    let app = init_app!(test_db.repo(), ValidationPolicy::Strict);

    let req = test::TestRequest::get()
        .uri("/api/v1/profile")
        .insert_header(bearer("user-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/profile/sync")
        .insert_header(bearer("user-1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["full_name"], "Jane Doe");
}
