#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;
pub mod wizard;

#[cfg(feature = "server")]
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Opens the database and applies pending migrations. Deployments without a
/// database URL get a repository that answers every call with
/// "not configured".
#[cfg(feature = "server")]
pub fn build_repository(server_config: &ServerConfig) -> std::io::Result<DieselRepository> {
    if !server_config.storage_configured() {
        log::warn!("No database_url configured, storage endpoints will return 503");
        return Ok(DieselRepository::unavailable());
    }

    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let mut conn = pool
        .get()
        .map_err(|e| std::io::Error::other(format!("Failed to get connection: {e}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    Ok(DieselRepository::new(pool))
}

#[cfg(feature = "server")]
fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Registers every JSON handler under `/api`.
#[cfg(feature = "server")]
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    use crate::routes::api;

    cfg.service(
        web::scope("/api")
            .service(api::status)
            .service(api::get_draft)
            .service(api::save_draft)
            .service(api::delete_draft)
            .service(api::validate_draft)
            .service(api::list_clients)
            .service(api::create_client)
            .service(api::update_client)
            .service(api::delete_client)
            .service(api::get_profile)
            .service(api::update_profile)
            .service(api::sync_profile),
    );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = build_repository(&server_config)?;
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting order intake API on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config.allowed_origins))
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
