//! Flow invocation pipeline

use crate::config::DEFAULT_TEMPERATURE;
use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowRegistry};
use crate::model::{GenerateRequest, GenerativeModel};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Invokes registered flows against a generative model
///
/// The engine holds no per-invocation state: invocations are independent and
/// may run concurrently. A failure at any step propagates directly to the
/// caller; there is no retry, timeout, or fallback.
pub struct FlowEngine {
    model: Arc<dyn GenerativeModel>,
    registry: FlowRegistry,
    temperature: f32,
}

impl FlowEngine {
    pub fn new(model: Arc<dyn GenerativeModel>, registry: FlowRegistry) -> Self {
        Self {
            model,
            registry,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the sampling temperature used for every flow
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    /// Invoke a registered flow by name
    pub async fn invoke(&self, name: &str, input: Value) -> Result<Value> {
        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| FlowError::config(format!("unknown flow '{name}'")))?;
        self.invoke_definition(&definition, input).await
    }

    /// Run the invocation pipeline for one definition
    pub async fn invoke_definition(
        &self,
        definition: &FlowDefinition,
        input: Value,
    ) -> Result<Value> {
        let flow = definition.name();

        definition
            .input_schema()
            .validate(&input)
            .map_err(|v| FlowError::input_validation(flow, v.path, v.message))?;

        if let Some(fast_path) = definition.fast_path() {
            if let Some(output) = fast_path(&input) {
                debug!(flow, "fast path produced an output, skipping model call");
                definition
                    .output_schema()
                    .validate(&output)
                    .map_err(|v| FlowError::output_validation(flow, v.path, v.message))?;
                return Ok(output);
            }
        }

        let prompt = definition.template().render(&input)?;
        debug!(flow, prompt_len = prompt.len(), "prompt rendered");

        let request = GenerateRequest {
            flow: flow.to_string(),
            prompt,
            response_schema: definition.output_schema().to_response_schema(),
            temperature: self.temperature,
        };
        let output = self.model.generate(&request).await?;

        definition
            .output_schema()
            .validate(&output)
            .map_err(|v| FlowError::output_validation(flow, v.path, v.message))?;

        debug!(flow, "invocation complete");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;

    #[test]
    fn test_default_temperature_matches_the_config_default() {
        let engine = FlowEngine::new(
            Arc::new(MockModel::builder().build()),
            FlowRegistry::new(),
        );
        assert_eq!(engine.temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(engine.with_temperature(0.2).temperature(), 0.2);
    }
}
