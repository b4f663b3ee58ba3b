//! Built-in content-generation flows for the studio site
//!
//! Each module defines one flow: its input and output schemas, its prompt
//! template, and a typed wrapper that serializes the request record, invokes
//! the engine, and deserializes the validated response. Registration is
//! explicit via [`builtin_flows`].

pub mod blog;
pub mod caption;
pub mod moderation;
pub mod search;
pub mod service;
pub mod theme;

use crate::error::Result;
use crate::flow::FlowRegistry;

/// Build the registry of all six built-in flows
pub fn builtin_flows() -> Result<FlowRegistry> {
    let mut registry = FlowRegistry::new();
    registry.register(moderation::definition()?)?;
    registry.register(caption::definition()?)?;
    registry.register(search::definition()?)?;
    registry.register(theme::definition()?)?;
    registry.register(service::definition()?)?;
    registry.register(blog::definition()?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_flows_register_cleanly() {
        let registry = builtin_flows().unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.names(),
            vec![
                "describe-service",
                "draft-post",
                "generate-caption",
                "moderate-image",
                "rank-photos",
                "suggest-theme",
            ]
        );
    }
}
