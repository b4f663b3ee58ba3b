//! Schema validation walk
//!
//! Validation stops at the first failing field and reports its dotted path
//! (`photos[1].title`) with a human-readable message. Unknown extra fields
//! on objects are accepted: model responses may over-produce, and the caller
//! only sees the fields the schema names.

use super::{Schema, SchemaKind};
use serde_json::Value;

/// The first schema violation found in a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted/indexed path to the failing field, or `$` for the root
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl Schema {
    /// Validate a value against this schema, returning the first violation
    pub fn validate(&self, value: &Value) -> Result<(), Violation> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), Violation> {
        match self.kind() {
            SchemaKind::String { allowed } => match value {
                Value::String(s) => {
                    if !allowed.is_empty() && !allowed.iter().any(|a| a == s) {
                        return Err(Violation::new(
                            path,
                            format!("'{}' is not one of [{}]", s, allowed.join(", ")),
                        ));
                    }
                    Ok(())
                }
                other => Err(Violation::new(
                    path,
                    format!("expected a string, got {}", type_name(other)),
                )),
            },
            SchemaKind::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(Violation::new(
                        path,
                        format!("expected a number, got {}", type_name(value)),
                    ))
                }
            }
            SchemaKind::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err(Violation::new(
                        path,
                        format!("expected an integer, got {}", type_name(value)),
                    ))
                }
            }
            SchemaKind::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(Violation::new(
                        path,
                        format!("expected a boolean, got {}", type_name(value)),
                    ))
                }
            }
            SchemaKind::Array(element) => match value {
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        element.validate_at(item, &format!("{path}[{i}]"))?;
                    }
                    Ok(())
                }
                other => Err(Violation::new(
                    path,
                    format!("expected an array, got {}", type_name(other)),
                )),
            },
            SchemaKind::Object(fields) => match value {
                Value::Object(map) => {
                    for field in fields {
                        let child_path = if path == "$" {
                            field.name.clone()
                        } else {
                            format!("{path}.{}", field.name)
                        };
                        match map.get(&field.name) {
                            // null for an optional field is treated as absent
                            None | Some(Value::Null) => {
                                if field.required {
                                    return Err(Violation::new(
                                        &child_path,
                                        "missing required field",
                                    ));
                                }
                            }
                            Some(child) => {
                                field.schema.validate_at(child, &child_path)?;
                            }
                        }
                    }
                    Ok(())
                }
                other => Err(Violation::new(
                    path,
                    format!("expected an object, got {}", type_name(other)),
                )),
            },
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
