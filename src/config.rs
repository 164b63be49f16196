use std::{env, net::SocketAddr, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
}

/// Which backend serves the facts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    DynamoDb,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub facts_table: String,
    // Store region as string for simplicity here; startup can convert
    pub aws_region: String,
    // Optional endpoint for LocalStack
    pub endpoint_url: Option<String>,
    pub backend: BackendKind,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();

        let bind_address_str =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = SocketAddr::from_str(&bind_address_str)
            .map_err(|e| ConfigError::InvalidVar("BIND_ADDRESS".into(), e.to_string()))?;

        let facts_table = env::var("FACTS_TABLE_NAME").unwrap_or_else(|_| "facts".to_string());

        let aws_region =
            env::var("AWS_DEFAULT_REGION").unwrap_or_else(|_| "ca-central-1".to_string());

        // Allow overriding endpoint for localstack/testing
        let endpoint_url = env::var("AWS_ENDPOINT_URL").ok();

        let backend = match env::var("FACTS_BACKEND").as_deref() {
            Err(_) | Ok("dynamodb") => BackendKind::DynamoDb,
            Ok("memory") => BackendKind::Memory,
            Ok(other) => {
                return Err(ConfigError::InvalidVar("FACTS_BACKEND".into(), other.to_string()));
            }
        };

        Ok(Config {
            bind_address,
            facts_table,
            aws_region,
            endpoint_url,
            backend,
        })
    }
}
