//! Service description flow
//!
//! Writes marketing copy for one of the studio's offerings (weddings,
//! portraits, events) from its name, optional target audience, and a list
//! of highlights.

use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowEngine};
use crate::schema::{Schema, SchemaField};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "describe-service";

const TEMPLATE: &str = "\
Write marketing copy for a photography service called \"{{ serviceName }}\".
{% if audience %}The copy should speak to {{ audience }}.
{% endif %}{% if highlights %}Highlights to feature:
{% for highlight in highlights %}- {{ highlight }}
{% endfor %}{% endif %}
Produce a warm, professional description of two or three sentences and a
short tagline.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCopy {
    pub description: String,
    pub tagline: String,
}

fn input_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required("serviceName", Schema::string()),
        SchemaField::optional("audience", Schema::string().describe("target audience")),
        SchemaField::required("highlights", Schema::array(Schema::string())),
    ])
}

fn output_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required("description", Schema::string()),
        SchemaField::required("tagline", Schema::string()),
    ])
}

pub fn definition() -> Result<FlowDefinition> {
    FlowDefinition::new(
        NAME,
        "Write marketing copy for a studio service",
        input_schema(),
        output_schema(),
        TEMPLATE,
    )
}

/// Write description and tagline copy for a service
pub async fn describe_service(
    engine: &FlowEngine,
    request: &ServiceRequest,
) -> Result<ServiceCopy> {
    let input = serde_json::to_value(request)
        .map_err(|e| FlowError::input_validation(NAME, "$", e.to_string()))?;
    let output = engine.invoke(NAME, input).await?;
    serde_json::from_value(output)
        .map_err(|e| FlowError::output_validation(NAME, "$", e.to_string()))
}
