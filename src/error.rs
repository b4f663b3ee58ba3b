//! Unified error type for shutterflow
//!
//! Every failure surfaces as a [`FlowError`] and propagates synchronously to
//! the caller. There is no retry, fallback, or local recovery anywhere in
//! this crate: an invocation either returns a schema-valid output or exactly
//! one of these errors.

use thiserror::Error;

/// The unified error type for the shutterflow library
#[derive(Error, Debug)]
pub enum FlowError {
    /// Caller-supplied data did not match the flow's input schema.
    /// Raised before any external call is attempted.
    #[error("input validation failed for flow '{flow}' at '{field}': {message}")]
    InputValidation {
        flow: String,
        field: String,
        message: String,
    },

    /// The model's structured response did not match the flow's output
    /// schema. The model is asked, not guaranteed, to conform.
    #[error("output validation failed for flow '{flow}' at '{field}': {message}")]
    OutputValidation {
        flow: String,
        field: String,
        message: String,
    },

    /// The external model call itself failed (transport, auth, HTTP status).
    #[error("model invocation failed for flow '{flow}': {message}")]
    ModelInvocation {
        flow: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A prompt template referenced a field absent from the input schema,
    /// or rendering failed.
    #[error("template error in '{template}': {message}")]
    Template {
        template: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration loading or validation failed, or a flow name could not
    /// be resolved against the registry.
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The storage CORS PATCH request failed.
    #[error("storage error for bucket '{bucket}': {message}")]
    Storage {
        bucket: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl FlowError {
    /// Create an input validation error
    pub fn input_validation(
        flow: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InputValidation {
            flow: flow.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an output validation error
    pub fn output_validation(
        flow: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::OutputValidation {
            flow: flow.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a model invocation error
    pub fn model_invocation(flow: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModelInvocation {
            flow: flow.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a template error
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error
    pub fn storage(bucket: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            bucket: bucket.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::ModelInvocation { source: src, .. }
            | Self::Template { source: src, .. }
            | Self::Config { source: src, .. }
            | Self::Storage { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::InputValidation { .. } | Self::OutputValidation { .. } => {}
        }
        self
    }

    /// Flow name this error was raised for, if any
    pub fn flow(&self) -> Option<&str> {
        match self {
            Self::InputValidation { flow, .. }
            | Self::OutputValidation { flow, .. }
            | Self::ModelInvocation { flow, .. } => Some(flow),
            _ => None,
        }
    }
}

/// Type alias for Results using FlowError
pub type Result<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_field() {
        let err = FlowError::input_validation("rank-photos", "query", "expected a string");
        assert!(err.to_string().contains("rank-photos"));
        assert!(err.to_string().contains("query"));
        assert_eq!(err.flow(), Some("rank-photos"));
    }

    #[test]
    fn test_with_source_chains() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no config");
        let err = FlowError::config("cannot read config file").with_source(io_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
