//! Testing utilities
//!
//! [`MockModel`] stands in for the hosted model endpoint so flow behavior
//! can be tested without network access, including the assertion that a
//! given invocation made zero external calls.

use crate::error::{FlowError, Result};
use crate::model::{GenerateRequest, GenerativeModel};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

enum CannedResponse {
    Output(Value),
    Failure(String),
}

/// Builder for configured mock models
pub struct MockModelBuilder {
    responses: HashMap<String, CannedResponse>,
    default_response: Value,
}

impl MockModelBuilder {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: json!({}),
        }
    }

    /// Canned structured output for a specific flow
    pub fn with_response(mut self, flow: &str, response: Value) -> Self {
        self.responses
            .insert(flow.to_string(), CannedResponse::Output(response));
        self
    }

    /// Force a model invocation failure for a specific flow
    pub fn with_error(mut self, flow: &str, message: &str) -> Self {
        self.responses
            .insert(flow.to_string(), CannedResponse::Failure(message.to_string()));
        self
    }

    /// Structured output returned for flows without a canned response
    pub fn with_default(mut self, response: Value) -> Self {
        self.default_response = response;
        self
    }

    pub fn build(self) -> MockModel {
        MockModel {
            responses: Arc::new(self.responses),
            default_response: Arc::new(self.default_response),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for MockModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock implementation of [`GenerativeModel`] with call counting
#[derive(Clone)]
pub struct MockModel {
    responses: Arc<HashMap<String, CannedResponse>>,
    default_response: Arc<Value>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockModel {
    pub fn builder() -> MockModelBuilder {
        MockModelBuilder::new()
    }

    /// Number of generate calls made so far
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The rendered prompt from the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<Value> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());

        match self.responses.get(&request.flow) {
            Some(CannedResponse::Output(value)) => Ok(value.clone()),
            Some(CannedResponse::Failure(message)) => {
                Err(FlowError::model_invocation(&request.flow, message.clone()))
            }
            None => Ok((*self.default_response).clone()),
        }
    }
}
