//! Google AI (Gemini) structured-output client

use super::{GenerateRequest, GenerativeModel};
use crate::config::GenerativeConfig;
use crate::error::{FlowError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// Client for a Gemini-style `models/{model}:generateContent` endpoint
///
/// Each flow invocation issues exactly one request. There is no retry,
/// backoff, or rate limiting; transport and HTTP failures surface as
/// [`FlowError::ModelInvocation`].
pub struct GoogleAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GoogleAiClient {
    /// Create a new client from an explicit configuration object
    pub fn new(config: &GenerativeConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| FlowError::config("failed to create HTTP client").with_source(e))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GoogleAiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<Value> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema.clone(),
            },
        };

        debug!(flow = %request.flow, model = %self.model, "calling model endpoint");
        trace!(prompt = %request.prompt, "rendered prompt");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                FlowError::model_invocation(&request.flow, "request failed").with_source(e)
            })?;

        match response.status() {
            StatusCode::OK => {
                let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
                    FlowError::model_invocation(&request.flow, "unreadable response body")
                        .with_source(e)
                })?;

                let text = parsed
                    .candidates
                    .first()
                    .and_then(|c| c.content.parts.first())
                    .map(|p| p.text.as_str())
                    .ok_or_else(|| {
                        FlowError::output_validation(
                            &request.flow,
                            "$",
                            "model returned no candidates",
                        )
                    })?;

                // The model is asked for JSON; anything else is a malformed
                // structured response, not a transport failure.
                serde_json::from_str(text).map_err(|e| {
                    FlowError::output_validation(
                        &request.flow,
                        "$",
                        format!("model response is not valid JSON: {e}"),
                    )
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FlowError::model_invocation(
                &request.flow,
                "authentication with the model endpoint failed",
            )),
            StatusCode::TOO_MANY_REQUESTS => Err(FlowError::model_invocation(
                &request.flow,
                "model endpoint rate limit exceeded",
            )),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(FlowError::model_invocation(
                    &request.flow,
                    format!("model endpoint returned {status}: {body}"),
                ))
            }
        }
    }
}
