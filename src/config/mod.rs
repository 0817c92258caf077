use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Set to false to run without the semantic search index.
    pub enabled: bool,
    pub default_limit: usize,
    pub max_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub max_request_body_size: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let external_url = std::env::var("EXTERNAL_URL").ok();

        let csv_path = std::env::var("RECIPES_CSV")
            .unwrap_or_else(|_| "data/recipes.csv".to_string())
            .into();

        let search_enabled = match std::env::var("SEMANTIC_SEARCH")
            .unwrap_or_else(|_| "on".to_string())
            .to_lowercase()
            .as_str()
        {
            "on" | "true" | "1" => true,
            "off" | "false" | "0" => false,
            _ => return Err(Error::Config("Invalid SEMANTIC_SEARCH value".to_string())),
        };

        let default_limit = std::env::var("SEMANTIC_DEFAULT_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEMANTIC_DEFAULT_LIMIT value".to_string()))?;

        let max_limit = std::env::var("SEMANTIC_MAX_LIMIT")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEMANTIC_MAX_LIMIT value".to_string()))?;

        let page_size = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PAGE_SIZE value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                external_url,
            },
            data: DataConfig { csv_path },
            search: SearchConfig {
                enabled: search_enabled,
                default_limit,
                max_limit,
            },
            pagination: PaginationConfig {
                page_size,
                max_request_body_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.pagination.page_size == 0 {
            return Err(Error::Config("Page size must be non-zero".to_string()));
        }

        if self.search.max_limit == 0 || self.search.default_limit > self.search.max_limit {
            return Err(Error::Config(
                "Semantic search limits must be non-zero and default <= max".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8001,
                external_url: None,
            },
            data: DataConfig {
                csv_path: "data/recipes.csv".into(),
            },
            search: SearchConfig {
                enabled: true,
                default_limit: 10,
                max_limit: 50,
            },
            pagination: PaginationConfig {
                page_size: 10,
                max_request_body_size: 1048576,
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_rejects_zero_page_size() {
        let mut settings = test_settings();
        settings.pagination.page_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_rejects_inverted_search_limits() {
        let mut settings = test_settings();
        settings.search.default_limit = 100;
        assert!(settings.validate().is_err());
    }
}
