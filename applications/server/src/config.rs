/// Server configuration
use crate::error::{Result, ServerError};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Config file read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "shelf.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Allowed browser origins. Empty means any origin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsSettings {
    /// Build the CORS layer for the router
    pub fn layer(&self) -> Result<CorsLayer> {
        if self.allowed_origins.is_empty() {
            return Ok(CorsLayer::permissive());
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ServerError::Config(format!("Invalid CORS origin: {}", origin)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any))
    }
}

impl ServerConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; the default `shelf.toml` is optional.
    /// Environment variables use the `SHELF_` prefix with `__` between
    /// section and key, e.g. `SHELF_STORAGE__DATABASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SHELF_)
        settings = settings.add_source(
            config::Environment::with_prefix("SHELF")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must be non-zero".to_string()));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "storage.database_url is required (set SHELF_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        for origin in &self.cors.allowed_origins {
            let parsed = url::Url::parse(origin)
                .map_err(|e| ServerError::Config(format!("Invalid CORS origin {}: {}", origin, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ServerError::Config(format!(
                    "CORS origin must be http or https: {}",
                    origin
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/shelf.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            cors: CorsSettings::default(),
        }
    }
}
