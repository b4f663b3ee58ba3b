//! # Shutterflow
//!
//! Schema-validated generative content flows for a photography portfolio
//! studio. Each flow wraps one (input schema, output schema, prompt
//! template) triple: given an input record it validates the input, renders
//! the prompt, calls the hosted model endpoint with the output schema as a
//! structured-output constraint, validates the response, and returns it.
//!
//! Flows are stateless between calls and fail fast: a validation, template,
//! or transport failure propagates directly to the caller with no retry or
//! fallback.
//!
//! ## Modules
//!
//! - `config` - explicit configuration loaded once at process start
//! - `error` - the unified `FlowError` type
//! - `flow` - definitions, the explicit registry, and the invocation engine
//! - `flows` - the six built-in flows (moderation, caption, search ranking,
//!   theme suggestion, service copy, blog drafting)
//! - `model` - the generative endpoint trait and its Gemini-style client
//! - `schema` - structural schemas and the validator
//! - `storage` - bucket CORS configuration utility
//! - `template` - prompt templates with interpolation, conditionals, loops
//! - `testing` - mock model with call counting
//!
//! ## Example
//!
//! ```no_run
//! use shutterflow::config::AppConfig;
//! use shutterflow::flow::FlowEngine;
//! use shutterflow::flows::{self, caption};
//! use shutterflow::model::GoogleAiClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> shutterflow::Result<()> {
//! let config = AppConfig::load(None)?;
//! let model = GoogleAiClient::new(&config.generative)?;
//! let engine = FlowEngine::new(Arc::new(model), flows::builtin_flows()?)
//!     .with_temperature(config.generative.temperature);
//!
//! let generated = caption::generate_caption(
//!     &engine,
//!     &caption::CaptionRequest {
//!         title: "Dusk at the pier".to_string(),
//!         category: Some("seascapes".to_string()),
//!         keywords: vec!["golden hour".to_string()],
//!     },
//! )
//! .await?;
//! println!("{}", generated.caption);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod flows;
pub mod model;
pub mod schema;
pub mod storage;
pub mod template;

pub mod testing;

pub use error::{FlowError, Result};

/// Install a `tracing` subscriber for embedding applications and tests
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
