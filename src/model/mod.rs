//! Generative model endpoint abstraction
//!
//! [`GenerativeModel`] is the single seam between flow invocation and the
//! hosted model API, kept as a trait so tests can substitute a mock and
//! count calls. The production implementation is [`GoogleAiClient`].

mod googleai;

pub use googleai::GoogleAiClient;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One structured-output generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Flow name, used for error attribution
    pub flow: String,
    /// Fully rendered prompt text
    pub prompt: String,
    /// OpenAPI-style schema the model is asked (not guaranteed) to conform to
    pub response_schema: Value,
    pub temperature: f32,
}

/// A hosted generative model endpoint
///
/// One call per invocation: implementations do not retry, batch, or impose
/// their own timeouts. A failed call propagates directly to the caller.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a structured JSON response for the given prompt
    async fn generate(&self, request: &GenerateRequest) -> Result<Value>;
}
