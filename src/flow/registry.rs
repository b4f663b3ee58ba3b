//! Explicit flow registry
//!
//! Built by one initialization call (see [`crate::flows::builtin_flows`])
//! rather than by module-load side effects, so the set of registered flows
//! is always inspectable.

use crate::error::{FlowError, Result};
use crate::flow::FlowDefinition;
use std::collections::HashMap;
use std::sync::Arc;

/// Name → definition map for all registered flows
#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: HashMap<String, Arc<FlowDefinition>>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition; duplicate names are rejected
    pub fn register(&mut self, definition: FlowDefinition) -> Result<()> {
        let name = definition.name().to_string();
        if self.flows.contains_key(&name) {
            return Err(FlowError::config(format!(
                "flow '{name}' is already registered"
            )));
        }
        self.flows.insert(name, Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<FlowDefinition>> {
        self.flows.get(name).cloned()
    }

    /// Names of all registered flows, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaField};

    fn sample_definition(name: &str) -> FlowDefinition {
        FlowDefinition::new(
            name,
            "sample",
            Schema::object(vec![SchemaField::required("topic", Schema::string())]),
            Schema::object(vec![SchemaField::required("text", Schema::string())]),
            "Write about {{ topic }}.",
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = FlowRegistry::new();
        registry.register(sample_definition("draft-post")).unwrap();
        assert!(registry.get("draft-post").is_some());
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.names(), vec!["draft-post"]);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = FlowRegistry::new();
        registry.register(sample_definition("draft-post")).unwrap();
        let err = registry.register(sample_definition("draft-post")).unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
