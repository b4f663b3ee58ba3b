//! Flow definitions, the registry, and the invocation engine
//!
//! A flow is one (input schema, output schema, prompt template) triple.
//! Definitions are immutable once constructed and held in an explicitly
//! built [`FlowRegistry`]; nothing is registered by import side effects.
//! [`FlowEngine`] performs the invocation pipeline: validate input, render
//! the prompt, call the model with the output schema as a structured-output
//! constraint, validate the response.

mod definition;
mod engine;
mod registry;

pub use definition::{FastPath, FlowDefinition};
pub use engine::FlowEngine;
pub use registry::FlowRegistry;
