//! Structural schemas for flow inputs and outputs
//!
//! A [`Schema`] describes the required shape of a data record. Schemas are
//! used symmetrically: inputs are validated before a prompt is rendered, and
//! the model's structured response is validated before it is returned to the
//! caller. A schema also serializes to the JSON dialect the model endpoint
//! accepts as its structured-output constraint.

mod validate;

pub use validate::Violation;

use serde_json::{json, Value};

/// A structural contract for a data record
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    description: Option<String>,
}

/// The shape a schema constrains a value to
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// A string, optionally restricted to a fixed set of values
    String { allowed: Vec<String> },
    /// Any JSON number
    Number,
    /// A whole number
    Integer,
    Boolean,
    /// A homogeneous list of elements
    Array(Box<Schema>),
    /// A record with named fields, in declaration order
    Object(Vec<SchemaField>),
}

/// One named field of an object schema
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    pub schema: Schema,
    pub required: bool,
}

impl Schema {
    pub fn string() -> Self {
        Self {
            kind: SchemaKind::String { allowed: Vec::new() },
            description: None,
        }
    }

    /// A string restricted to the given values
    pub fn string_enum<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: SchemaKind::String {
                allowed: allowed.into_iter().map(Into::into).collect(),
            },
            description: None,
        }
    }

    pub fn number() -> Self {
        Self {
            kind: SchemaKind::Number,
            description: None,
        }
    }

    pub fn integer() -> Self {
        Self {
            kind: SchemaKind::Integer,
            description: None,
        }
    }

    pub fn boolean() -> Self {
        Self {
            kind: SchemaKind::Boolean,
            description: None,
        }
    }

    pub fn array(element: Schema) -> Self {
        Self {
            kind: SchemaKind::Array(Box::new(element)),
            description: None,
        }
    }

    pub fn object(fields: Vec<SchemaField>) -> Self {
        Self {
            kind: SchemaKind::Object(fields),
            description: None,
        }
    }

    /// Attach a human-readable description, forwarded to the model endpoint
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Look up a field by name; `None` unless this is an object schema
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        match &self.kind {
            SchemaKind::Object(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Field names of an object schema, in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        match &self.kind {
            SchemaKind::Object(fields) => fields.iter().map(|f| f.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Convert to the OpenAPI-style JSON schema the model endpoint accepts
    /// as a structured-output constraint
    pub fn to_response_schema(&self) -> Value {
        let mut out = match &self.kind {
            SchemaKind::String { allowed } => {
                if allowed.is_empty() {
                    json!({ "type": "string" })
                } else {
                    json!({ "type": "string", "enum": allowed })
                }
            }
            SchemaKind::Number => json!({ "type": "number" }),
            SchemaKind::Integer => json!({ "type": "integer" }),
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::Array(element) => {
                json!({ "type": "array", "items": element.to_response_schema() })
            }
            SchemaKind::Object(fields) => {
                let mut properties = serde_json::Map::new();
                let mut required = Vec::new();
                for field in fields {
                    properties.insert(field.name.clone(), field.schema.to_response_schema());
                    if field.required {
                        required.push(Value::String(field.name.clone()));
                    }
                }
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                })
            }
        };
        if let Some(description) = &self.description {
            if let Some(map) = out.as_object_mut() {
                map.insert("description".to_string(), json!(description));
            }
        }
        out
    }
}

impl SchemaField {
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_schema_marks_required_fields() {
        let schema = Schema::object(vec![
            SchemaField::required("title", Schema::string()),
            SchemaField::optional("category", Schema::string()),
        ]);
        let rendered = schema.to_response_schema();
        assert_eq!(rendered["type"], json!("object"));
        assert_eq!(rendered["required"], json!(["title"]));
        assert!(rendered["properties"]["category"].is_object());
    }

    #[test]
    fn test_enum_schema_lists_values() {
        let schema = Schema::string_enum(["warm", "cool"]);
        let rendered = schema.to_response_schema();
        assert_eq!(rendered["enum"], json!(["warm", "cool"]));
    }

    #[test]
    fn test_description_is_forwarded() {
        let schema = Schema::string().describe("the photo title");
        assert_eq!(schema.to_response_schema()["description"], json!("the photo title"));
    }
}
