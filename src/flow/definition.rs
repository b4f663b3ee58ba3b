//! Immutable flow definitions

use crate::error::Result;
use crate::schema::Schema;
use crate::template::PromptTemplate;
use serde_json::Value;

/// A per-definition short circuit, consulted after input validation
///
/// When it produces a value, that value is validated against the output
/// schema and returned without any model call. This is an explicit fast
/// path for individual flows, not a general caching or fallback policy.
pub type FastPath = fn(&Value) -> Option<Value>;

/// One named, schema-validated generative operation
#[derive(Debug)]
pub struct FlowDefinition {
    name: String,
    description: String,
    input_schema: Schema,
    output_schema: Schema,
    template: PromptTemplate,
    fast_path: Option<FastPath>,
}

impl FlowDefinition {
    /// Build a definition, compiling the template against the input schema
    ///
    /// Fails with a template error if the template references a field the
    /// input schema does not declare.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Schema,
        output_schema: Schema,
        template_source: &str,
    ) -> Result<Self> {
        let name = name.into();
        let template = PromptTemplate::new(name.clone(), template_source, &input_schema)?;
        Ok(Self {
            name,
            description: description.into(),
            input_schema,
            output_schema,
            template,
            fast_path: None,
        })
    }

    pub fn with_fast_path(mut self, fast_path: FastPath) -> Self {
        self.fast_path = Some(fast_path);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn fast_path(&self) -> Option<FastPath> {
        self.fast_path
    }
}
