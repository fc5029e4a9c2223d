//! Configuration management for the catalog client
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CatalogError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog API endpoints
    pub api: ApiConfig,
    /// Placeholder images for entities without one
    pub assets: AssetDefaults,
    /// Map search settings for the directions action
    pub directions: DirectionsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Catalog API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are joined onto
    pub base_url: String,
    /// Path of the attractions (events) endpoint
    pub attractions_path: String,
    /// Path of the routes (trails) endpoint
    pub routes_path: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Collaborator-supplied default image references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetDefaults {
    pub attraction_placeholder: String,
    pub route_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsConfig {
    /// Map search URL; the encoded query is appended to it
    pub maps_search_url: String,
    /// Region appended to text searches
    pub region: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_attractions_path() -> String {
    "eventos".to_string()
}

fn default_routes_path() -> String {
    "trilhas".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_attraction_placeholder() -> String {
    "https://images.pexels.com/photos/417074/pexels-photo-417074.jpeg".to_string()
}

fn default_route_placeholder() -> String {
    "https://images.pexels.com/photos/1647962/pexels-photo-1647962.jpeg".to_string()
}

fn default_maps_search_url() -> String {
    "https://www.google.com/maps/search/?api=1&query=".to_string()
}

fn default_region() -> String {
    "Teresópolis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            attractions_path: default_attractions_path(),
            routes_path: default_routes_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AssetDefaults {
    fn default() -> Self {
        Self {
            attraction_placeholder: default_attraction_placeholder(),
            route_placeholder: default_route_placeholder(),
        }
    }
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            maps_search_url: default_maps_search_url(),
            region: default_region(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TEREVERDE_API__BASE_URL=... overrides api.base_url
        builder = builder.add_source(
            Environment::with_prefix("TEREVERDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CatalogConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tereverde").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.base_url.is_empty() {
            self.api.base_url = default_base_url();
        }
        if self.api.attractions_path.is_empty() {
            self.api.attractions_path = default_attractions_path();
        }
        if self.api.routes_path.is_empty() {
            self.api.routes_path = default_routes_path();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
        if self.assets.attraction_placeholder.is_empty() {
            self.assets.attraction_placeholder = default_attraction_placeholder();
        }
        if self.assets.route_placeholder.is_empty() {
            self.assets.route_placeholder = default_route_placeholder();
        }
        if self.directions.maps_search_url.is_empty() {
            self.directions.maps_search_url = default_maps_search_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(CatalogError::config("API timeout cannot exceed 300 seconds").into());
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CatalogError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CatalogError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("API base URL", &self.api.base_url),
            ("Maps search URL", &self.directions.maps_search_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    CatalogError::config(format!("{name} must be a valid HTTP or HTTPS URL"))
                        .into(),
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.api.attractions_path, "eventos");
        assert_eq!(config.api.routes_path, "trilhas");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.directions.region, "Teresópolis");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = CatalogConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = CatalogConfig::default();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_base_url() {
        let mut config = CatalogConfig::default();
        config.api.base_url = "ftp://example.org".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("API base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = CatalogConfig::default();
        config.api.base_url.clear();
        config.api.timeout_seconds = 0;
        config.assets.route_placeholder.clear();
        config.apply_defaults();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(config.assets.route_placeholder.contains("1647962"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path =
            std::env::temp_dir().join(format!("tereverde-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nbase_url = \"https://parques.example.org/api\"").unwrap();
        drop(file);

        let config = CatalogConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.api.base_url, "https://parques.example.org/api");
        assert_eq!(config.api.routes_path, "trilhas");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = CatalogConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("tereverde"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
