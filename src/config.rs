//! Memodex configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main memodex configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemodexConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins; empty means allow any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted snapshot
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Default data directory (~/.memodex)
pub fn default_data_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".memodex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MemodexConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(config.server.cors_origins.is_empty());
        assert!(config.storage.data_dir.ends_with(".memodex"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: MemodexConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.storage.data_dir.ends_with(".memodex"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = MemodexConfig::default();
        config.server.cors_origins = vec!["http://localhost:3000".to_string()];
        config.storage.data_dir = PathBuf::from("/var/lib/memodex");

        let toml = toml::to_string_pretty(&config).unwrap();
        let back: MemodexConfig = toml::from_str(&toml).unwrap();
        assert_eq!(back.server.cors_origins, config.server.cors_origins);
        assert_eq!(back.storage.data_dir, config.storage.data_dir);
    }
}
