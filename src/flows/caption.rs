//! Caption generation flow
//!
//! Produces a display caption and accessibility alt text for a photo from
//! its title, optional collection category, and keywords.

use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowEngine};
use crate::schema::{Schema, SchemaField};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "generate-caption";

const TEMPLATE: &str = "\
Write a caption for a portfolio photo titled \"{{ title }}\".
{% if category %}The photo belongs to the {{ category }} collection.
{% endif %}{% if keywords %}Keywords to weave in where natural:
{% for keyword in keywords %}- {{ keyword }}
{% endfor %}{% endif %}
The caption should be one or two evocative sentences. Also produce concise
alt text describing the image for screen readers.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCaption {
    pub caption: String,
    pub alt_text: String,
}

fn input_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required("title", Schema::string().describe("the photo title")),
        SchemaField::optional(
            "category",
            Schema::string().describe("gallery collection the photo belongs to"),
        ),
        SchemaField::required("keywords", Schema::array(Schema::string())),
    ])
}

fn output_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required("caption", Schema::string().describe("display caption")),
        SchemaField::required(
            "altText",
            Schema::string().describe("alt text for screen readers"),
        ),
    ])
}

pub fn definition() -> Result<FlowDefinition> {
    FlowDefinition::new(
        NAME,
        "Generate a caption and alt text for a photo",
        input_schema(),
        output_schema(),
        TEMPLATE,
    )
}

/// Generate a caption and alt text for one photo
pub async fn generate_caption(
    engine: &FlowEngine,
    request: &CaptionRequest,
) -> Result<GeneratedCaption> {
    let input = serde_json::to_value(request)
        .map_err(|e| FlowError::input_validation(NAME, "$", e.to_string()))?;
    let output = engine.invoke(NAME, input).await?;
    serde_json::from_value(output)
        .map_err(|e| FlowError::output_validation(NAME, "$", e.to_string()))
}
