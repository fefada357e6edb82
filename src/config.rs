//! Process configuration read from the environment

use std::net::SocketAddr;

use thiserror::Error;

use crate::llm::gemini::{GeminiConfig, GeminiEndpoint, GeminiModel};
use crate::store::StoreConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";
const DEFAULT_GCP_LOCATION: &str = "us-central1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set in environment variables")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Deployment flavor, from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if name.eq_ignore_ascii_case("development") => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = Environment::from_name(var("APP_ENV").as_deref());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let store = StoreConfig::from_connection_string(&database_url)
            .map_err(|e| ConfigError::Invalid {
                var: "DATABASE_URL",
                reason: e.to_string(),
            })?
            .with_query_logging(environment.is_development());

        let endpoint = match (var("GEMINI_API_KEY"), var("GCP_PROJECT_ID")) {
            (Some(api_key), _) => GeminiEndpoint::ApiKey { api_key },
            (None, Some(project_id)) => GeminiEndpoint::Vertex {
                project_id,
                location: var("GCP_LOCATION").unwrap_or_else(|| DEFAULT_GCP_LOCATION.to_string()),
            },
            (None, None) => return Err(ConfigError::Missing("GEMINI_API_KEY")),
        };

        let mut gemini = GeminiConfig::new(endpoint);
        if let Some(model) = var("GEMINI_MODEL") {
            let model = model.parse::<GeminiModel>().map_err(|e| ConfigError::Invalid {
                var: "GEMINI_MODEL",
                reason: e.to_string(),
            })?;
            gemini = gemini.with_model(model);
        }
        if let Some(instruction) = var("GEMINI_SYSTEM_INSTRUCTION") {
            gemini = gemini.with_system_instruction(instruction);
        }

        Ok(Self {
            environment,
            bind_addr,
            store,
            gemini,
        })
    }
}
