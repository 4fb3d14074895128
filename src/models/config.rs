//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::wizard::validation::ValidationPolicy;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// SQLite database path. An empty value starts the service in
    /// "service unavailable" mode.
    #[serde(default)]
    pub database_url: String,
    /// HS256 secret shared with the identity provider.
    pub jwt_secret: String,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

impl ServerConfig {
    pub fn storage_configured(&self) -> bool {
        !self.database_url.trim().is_empty()
    }
}
