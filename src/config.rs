//! Explicit configuration for the embedding application
//!
//! Configuration is loaded once at process start and passed explicitly to
//! component constructors; nothing in this crate reads configuration from
//! global state after that point. Sources are layered: hardcoded defaults,
//! then an optional TOML file, then `SHUTTERFLOW_*` environment variables
//! (highest priority).

use crate::error::{FlowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Sampling temperature used when none is configured
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Settings for the hosted generative model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// API key for the model endpoint. Overridden by `SHUTTERFLOW_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier. Overridden by `SHUTTERFLOW_MODEL`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint base URL. Overridden by `SHUTTERFLOW_BASE_URL`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature used for every flow.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Settings for the object-storage CORS utility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name. Overridden by `SHUTTERFLOW_STORAGE_BUCKET`.
    #[serde(default)]
    pub bucket: String,

    /// OAuth bearer token for the storage API.
    /// Overridden by `SHUTTERFLOW_STORAGE_TOKEN`.
    #[serde(default)]
    pub access_token: String,

    /// Origins allowed to read uploaded photos.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_generative")]
    pub generative: GenerativeConfig,

    #[serde(default = "default_storage")]
    pub storage: StorageConfig,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_generative() -> GenerativeConfig {
    GenerativeConfig {
        api_key: String::new(),
        model: default_model(),
        base_url: default_base_url(),
        temperature: default_temperature(),
    }
}

fn default_storage() -> StorageConfig {
    StorageConfig {
        bucket: String::new(),
        access_token: String::new(),
        allowed_origins: default_origins(),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generative: default_generative(),
            storage: default_storage(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus environment
    /// overrides, then validate it
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    FlowError::config(format!("cannot read config file {}", path.display()))
                        .with_source(e)
                })?;
                toml::from_str(&raw).map_err(|e| {
                    FlowError::config(format!("invalid TOML in {}", path.display()))
                        .with_source(e)
                })?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("SHUTTERFLOW_API_KEY") {
            self.generative.api_key = key;
        }
        if let Ok(model) = std::env::var("SHUTTERFLOW_MODEL") {
            self.generative.model = model;
        }
        if let Ok(url) = std::env::var("SHUTTERFLOW_BASE_URL") {
            self.generative.base_url = url;
        }
        if let Ok(bucket) = std::env::var("SHUTTERFLOW_STORAGE_BUCKET") {
            self.storage.bucket = bucket;
        }
        if let Ok(token) = std::env::var("SHUTTERFLOW_STORAGE_TOKEN") {
            self.storage.access_token = token;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.generative.api_key.is_empty() {
            return Err(FlowError::config(
                "generative.api_key is empty; set it in the config file or SHUTTERFLOW_API_KEY",
            ));
        }
        Url::parse(&self.generative.base_url).map_err(|e| {
            FlowError::config(format!(
                "generative.base_url '{}' is not a valid URL",
                self.generative.base_url
            ))
            .with_source(e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[generative]
api_key = "k-123"
model = "gemini-2.0-pro"

[storage]
bucket = "studio-photos"
allowed_origins = ["https://studio.example"]
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.generative.api_key, "k-123");
        assert_eq!(config.generative.model, "gemini-2.0-pro");
        // unspecified fields keep their defaults
        assert_eq!(
            config.generative.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.storage.bucket, "studio-photos");
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[generative]\nmodel = \"gemini-2.0-flash\"\n").unwrap();

        // guard against an ambient override leaking into the test
        if std::env::var("SHUTTERFLOW_API_KEY").is_ok() {
            return;
        }
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, FlowError::Config { .. }));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[generative]\napi_key = \"k\"\nbase_url = \"not a url\"\n"
        )
        .unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));
    }
}
