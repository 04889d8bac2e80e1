use dotenv::dotenv;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set for the rest backend")]
    MissingVar(&'static str),
}

/// Which directory backend the application talks to.
///
/// `Memory` keeps everything in-process and is the default for local
/// development and tests; `Rest` talks to the hosted document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryBackend {
    Memory,
    Rest,
}

/// Connection settings for the remote document store and auth provider.
///
/// Constructed explicitly and handed to the directory client at startup;
/// nothing in the workspace reads these variables anywhere else.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub endpoint: String,
    pub api_key: String,
    pub collection_name: String,
    /// Snapshot polling cadence for the REST subscription, in milliseconds.
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: DirectoryBackend,
    pub directory: DirectoryConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from environment variables (a `.env` file in the
    /// working directory is read first when present). Everything has a
    /// default except the API key, which the rest backend requires.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let backend = match env::var("DIRECTORY_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "rest" => DirectoryBackend::Rest,
            _ => DirectoryBackend::Memory,
        };

        let endpoint = env::var("DIRECTORY_ENDPOINT")
            .unwrap_or_else(|_| "http://127.0.0.1:9099".to_string());
        let api_key = match backend {
            // The hosted store rejects unauthenticated writes, so fail fast here.
            DirectoryBackend::Rest => env::var("DIRECTORY_API_KEY")
                .map_err(|_| ConfigError::MissingVar("DIRECTORY_API_KEY"))?,
            DirectoryBackend::Memory => env::var("DIRECTORY_API_KEY").unwrap_or_default(),
        };

        Ok(Self {
            backend,
            directory: DirectoryConfig {
                endpoint,
                api_key,
                collection_name: env::var("DIRECTORY_COLLECTION")
                    .unwrap_or_else(|_| "users".to_string()),
                poll_interval_ms: env::var("DIRECTORY_POLL_INTERVAL_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .unwrap_or(2000),
            },
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so every scenario lives in
    // this one test to keep them from racing each other.
    #[test]
    fn rest_backend_requires_an_api_key_and_memory_defaults() {
        env::set_var("DIRECTORY_BACKEND", "rest");
        env::remove_var("DIRECTORY_API_KEY");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar("DIRECTORY_API_KEY"))
        ));

        env::set_var("DIRECTORY_API_KEY", "k-123");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend, DirectoryBackend::Rest);
        assert_eq!(config.directory.api_key, "k-123");

        env::set_var("DIRECTORY_BACKEND", "memory");
        env::remove_var("DIRECTORY_API_KEY");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend, DirectoryBackend::Memory);
        assert_eq!(config.directory.collection_name, "users");
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }
}
