//! Prompt template rendering
//!
//! A [`PromptTemplate`] is a string template with named-field interpolation
//! (`{{ field }}`), conditional sections (`{% if field %}...{% endif %}`,
//! rendered only when the field is present and non-empty) and list iteration
//! (`{% for item in field %}...{% endfor %}`). There is no arbitrary code
//! execution: only field lookup, emptiness tests, and iteration.
//!
//! Templates are bound to an input schema at construction. Every root
//! identifier the template references must name a schema field (or a
//! loop-bound variable); anything else fails immediately rather than at
//! first render.

use crate::error::{FlowError, Result};
use crate::schema::Schema;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use tera::{Context, Tera};

static EXPR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());
static IF_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{%-?\s*(?:el)?if\s+(.+?)\s*-?%\}").unwrap());
static FOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{%-?\s*for\s+([A-Za-z_][A-Za-z0-9_]*)\s+in\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});
// string literals and filter applications match without capturing; bare
// identifiers capture their root segment, dotted tails are consumed
static COND_IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""[^"]*"|'[^']*'|\|\s*[A-Za-z_][A-Za-z0-9_]*|([A-Za-z_][A-Za-z0-9_]*)(?:\.[A-Za-z0-9_]+)*"#)
        .unwrap()
});

/// Expression keywords and literals that are not field references
const EXPR_KEYWORDS: &[&str] = &[
    "and", "or", "not", "in", "is", "defined", "undefined", "none",
    "true", "false", "True", "False",
];

/// A prompt template bound to the field names of an input schema
pub struct PromptTemplate {
    name: String,
    fields: Vec<String>,
    tera: Tera,
}

impl std::fmt::Debug for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptTemplate")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

impl PromptTemplate {
    /// Compile a template source against an input schema
    pub fn new(name: impl Into<String>, source: &str, input_schema: &Schema) -> Result<Self> {
        let name = name.into();
        let fields: Vec<String> = input_schema
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        check_references(&name, source, &fields)?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]); // prompts are plain text, not HTML
        tera.add_raw_template(&name, source)
            .map_err(|e| FlowError::template(&name, "invalid template syntax").with_source(e))?;

        Ok(Self { name, fields, tera })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template from a validated input record
    ///
    /// Every schema field is inserted into the render context; optional
    /// fields absent from the input become `null`, so their conditional
    /// sections are omitted entirely.
    pub fn render(&self, input: &Value) -> Result<String> {
        let record = input.as_object().ok_or_else(|| {
            FlowError::template(&self.name, "input record must be an object")
        })?;

        let mut context = Context::new();
        for field in &self.fields {
            match record.get(field) {
                Some(value) => context.insert(field.as_str(), value),
                None => context.insert(field.as_str(), &Value::Null),
            }
        }

        self.tera
            .render(&self.name, &context)
            .map_err(|e| FlowError::template(&self.name, "rendering failed").with_source(e))
    }
}

/// Verify that every root identifier the template references names a schema
/// field, a loop-bound variable, or tera's `loop` builtin
fn check_references(name: &str, source: &str, fields: &[String]) -> Result<()> {
    let mut loop_vars: HashSet<&str> = HashSet::new();
    loop_vars.insert("loop");
    for caps in FOR_RE.captures_iter(source) {
        if let Some(var) = caps.get(1) {
            loop_vars.insert(var.as_str());
        }
    }

    let mut referenced: Vec<&str> = EXPR_RE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    for caps in IF_TAG_RE.captures_iter(source) {
        if let Some(condition) = caps.get(1) {
            referenced.extend(condition_roots(condition.as_str()));
        }
    }
    referenced.extend(
        FOR_RE
            .captures_iter(source)
            .filter_map(|caps| caps.get(2).map(|m| m.as_str())),
    );

    for ident in referenced {
        if loop_vars.contains(ident) {
            continue;
        }
        if !fields.iter().any(|f| f == ident) {
            return Err(FlowError::template(
                name,
                format!("references '{ident}', which is not a field of the input schema"),
            ));
        }
    }
    Ok(())
}

/// Every root identifier of an `if` condition, with expression keywords,
/// string literals, and filter names excluded
fn condition_roots(condition: &str) -> Vec<&str> {
    COND_IDENT_RE
        .captures_iter(condition)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|ident| !EXPR_KEYWORDS.contains(ident))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaField};
    use serde_json::json;

    fn caption_schema() -> Schema {
        Schema::object(vec![
            SchemaField::required("title", Schema::string()),
            SchemaField::optional("category", Schema::string()),
            SchemaField::required("keywords", Schema::array(Schema::string())),
        ])
    }

    const CAPTION_TEMPLATE: &str = "Write a caption for \"{{ title }}\".\n\
{% if category %}The photo belongs to the {{ category }} collection.\n{% endif %}\
Keywords:\n{% for keyword in keywords %}- {{ keyword }}\n{% endfor %}";

    #[test]
    fn test_interpolation_and_iteration() {
        let template =
            PromptTemplate::new("caption", CAPTION_TEMPLATE, &caption_schema()).unwrap();
        let rendered = template
            .render(&json!({ "title": "Dusk", "keywords": ["golden hour", "coast"] }))
            .unwrap();
        assert!(rendered.contains("Write a caption for \"Dusk\"."));
        assert!(rendered.contains("- golden hour\n"));
        assert!(rendered.contains("- coast\n"));
    }

    #[test]
    fn test_conditional_section_omitted_when_field_absent() {
        let template =
            PromptTemplate::new("caption", CAPTION_TEMPLATE, &caption_schema()).unwrap();
        let rendered = template
            .render(&json!({ "title": "Dusk", "keywords": [] }))
            .unwrap();
        assert!(!rendered.contains("collection"));
    }

    #[test]
    fn test_conditional_section_appears_exactly_once_when_present() {
        let template =
            PromptTemplate::new("caption", CAPTION_TEMPLATE, &caption_schema()).unwrap();
        let rendered = template
            .render(&json!({ "title": "Dusk", "category": "landscape", "keywords": [] }))
            .unwrap();
        assert_eq!(rendered.matches("landscape collection").count(), 1);
    }

    #[test]
    fn test_empty_string_field_omits_conditional_section() {
        let template =
            PromptTemplate::new("caption", CAPTION_TEMPLATE, &caption_schema()).unwrap();
        let rendered = template
            .render(&json!({ "title": "Dusk", "category": "", "keywords": [] }))
            .unwrap();
        assert!(!rendered.contains("collection"));
    }

    #[test]
    fn test_unknown_field_is_rejected_at_construction() {
        let err = PromptTemplate::new(
            "caption",
            "Caption for {{ headline }}",
            &caption_schema(),
        )
        .unwrap_err();
        assert!(matches!(err, FlowError::Template { .. }));
        assert!(err.to_string().contains("headline"));
    }

    #[test]
    fn test_compound_condition_checks_every_identifier() {
        let err = PromptTemplate::new(
            "caption",
            "{% if category and headline %}both{% endif %}",
            &caption_schema(),
        )
        .unwrap_err();
        assert!(matches!(err, FlowError::Template { .. }));
        assert!(err.to_string().contains("headline"));
    }

    #[test]
    fn test_compound_condition_of_known_fields_is_accepted() {
        PromptTemplate::new(
            "caption",
            "{% if title and not category %}x{% endif %}",
            &caption_schema(),
        )
        .unwrap();
        PromptTemplate::new(
            "caption",
            "{% if category == \"landscape\" %}x{% endif %}",
            &caption_schema(),
        )
        .unwrap();
    }

    #[test]
    fn test_loop_variable_is_not_flagged_as_unknown() {
        let schema = Schema::object(vec![SchemaField::required(
            "photos",
            Schema::array(Schema::object(vec![SchemaField::required(
                "title",
                Schema::string(),
            )])),
        )]);
        PromptTemplate::new(
            "listing",
            "{% for photo in photos %}{{ loop.index }}. {{ photo.title }}\n{% endfor %}",
            &schema,
        )
        .unwrap();
    }

    #[test]
    fn test_unknown_loop_source_is_rejected() {
        let schema = Schema::object(vec![SchemaField::required(
            "photos",
            Schema::array(Schema::string()),
        )]);
        let err = PromptTemplate::new(
            "listing",
            "{% for item in entries %}{{ item }}{% endfor %}",
            &schema,
        )
        .unwrap_err();
        assert!(err.to_string().contains("entries"));
    }
}
