//! Gallery theme suggestion flow
//!
//! Suggests new gallery themes for the studio, optionally steered by a topic
//! and avoiding themes that already exist.

use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowEngine};
use crate::schema::{Schema, SchemaField};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "suggest-theme";

const TEMPLATE: &str = "\
Suggest three fresh gallery themes for a professional photography studio.
{% if topic %}The studio wants themes related to: {{ topic }}.
{% endif %}{% if existingThemes %}Themes that already exist, do not repeat them:
{% for theme in existingThemes %}- {{ theme }}
{% endfor %}{% endif %}
For each theme give a short name and a one-sentence description.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub existing_themes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSuggestion {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedThemes {
    pub themes: Vec<ThemeSuggestion>,
}

fn input_schema() -> Schema {
    Schema::object(vec![
        SchemaField::optional("topic", Schema::string().describe("steering topic")),
        SchemaField::required("existingThemes", Schema::array(Schema::string())),
    ])
}

fn output_schema() -> Schema {
    Schema::object(vec![SchemaField::required(
        "themes",
        Schema::array(Schema::object(vec![
            SchemaField::required("name", Schema::string()),
            SchemaField::required("description", Schema::string()),
        ])),
    )])
}

pub fn definition() -> Result<FlowDefinition> {
    FlowDefinition::new(
        NAME,
        "Suggest new gallery themes",
        input_schema(),
        output_schema(),
        TEMPLATE,
    )
}

/// Suggest gallery themes the studio does not already have
pub async fn suggest_themes(
    engine: &FlowEngine,
    request: &ThemeRequest,
) -> Result<SuggestedThemes> {
    let input = serde_json::to_value(request)
        .map_err(|e| FlowError::input_validation(NAME, "$", e.to_string()))?;
    let output = engine.invoke(NAME, input).await?;
    serde_json::from_value(output)
        .map_err(|e| FlowError::output_validation(NAME, "$", e.to_string()))
}
