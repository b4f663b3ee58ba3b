//! Object-storage CORS configuration
//!
//! The one non-AI utility flow: patches the photo bucket's CORS rules so the
//! public site can fetch uploaded images directly. A single PATCH request,
//! no retry.

use crate::config::StorageConfig;
use crate::error::{FlowError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const STORAGE_API: &str = "https://storage.googleapis.com/storage/v1/b";

/// One CORS rule in the storage API's wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsRule {
    pub origin: Vec<String>,
    pub method: Vec<String>,
    pub response_header: Vec<String>,
    pub max_age_seconds: u32,
}

#[derive(Debug, Serialize)]
struct CorsPatch {
    cors: Vec<CorsRule>,
}

/// The rules the studio site needs: read-only access from the configured
/// origins
pub fn site_rules(allowed_origins: &[String]) -> Vec<CorsRule> {
    vec![CorsRule {
        origin: allowed_origins.to_vec(),
        method: vec!["GET".to_string(), "HEAD".to_string()],
        response_header: vec!["Content-Type".to_string()],
        max_age_seconds: 3600,
    }]
}

/// Client for the storage bucket API
///
/// The HTTP client is constructed once and reused across calls, like the
/// model client.
#[derive(Debug)]
pub struct StorageClient {
    client: Client,
    bucket: String,
    access_token: String,
    allowed_origins: Vec<String>,
}

impl StorageClient {
    /// Create a client from an explicit configuration object
    pub fn new(config: &StorageConfig) -> Result<Self> {
        if config.bucket.is_empty() {
            return Err(FlowError::config("storage.bucket is empty"));
        }
        if config.access_token.is_empty() {
            return Err(FlowError::config(
                "storage.access_token is empty; set SHUTTERFLOW_STORAGE_TOKEN",
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| FlowError::config("failed to create HTTP client").with_source(e))?;

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            access_token: config.access_token.clone(),
            allowed_origins: config.allowed_origins.clone(),
        })
    }

    /// Apply the site's CORS rules to the configured bucket
    pub async fn apply_bucket_cors(&self) -> Result<()> {
        let url = format!("{STORAGE_API}/{}?fields=cors", self.bucket);
        let body = CorsPatch {
            cors: site_rules(&self.allowed_origins),
        };

        debug!(bucket = %self.bucket, "patching bucket CORS rules");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                FlowError::storage(&self.bucket, "CORS patch request failed").with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowError::storage(
                &self.bucket,
                format!("storage API returned {status}: {body}"),
            ));
        }

        debug!(bucket = %self.bucket, "CORS rules applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_rules_are_read_only() {
        let rules = site_rules(&["https://studio.example".to_string()]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].method, vec!["GET", "HEAD"]);
        assert_eq!(rules[0].origin, vec!["https://studio.example"]);
    }

    #[test]
    fn test_cors_rule_wire_names_are_camel_case() {
        let rules = site_rules(&["*".to_string()]);
        let json = serde_json::to_value(&rules[0]).unwrap();
        assert!(json.get("responseHeader").is_some());
        assert!(json.get("maxAgeSeconds").is_some());
    }

    #[test]
    fn test_empty_bucket_is_a_config_error() {
        let config = StorageConfig {
            bucket: String::new(),
            access_token: "t".to_string(),
            allowed_origins: vec!["*".to_string()],
        };
        let err = StorageClient::new(&config).unwrap_err();
        assert!(matches!(err, FlowError::Config { .. }));
    }

    #[test]
    fn test_missing_token_is_a_config_error() {
        let config = StorageConfig {
            bucket: "studio-photos".to_string(),
            access_token: String::new(),
            allowed_origins: vec!["*".to_string()],
        };
        let err = StorageClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn test_client_is_reusable_once_constructed() {
        let config = StorageConfig {
            bucket: "studio-photos".to_string(),
            access_token: "t".to_string(),
            allowed_origins: vec!["https://studio.example".to_string()],
        };
        let client = StorageClient::new(&config).unwrap();
        assert_eq!(client.bucket, "studio-photos");
    }
}
