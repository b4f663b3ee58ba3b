//! Blog post drafting flow
//!
//! Drafts a complete post for the studio blog: title, body, excerpt for the
//! listing page, and tags.

use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowEngine};
use crate::schema::{Schema, SchemaField};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "draft-post";

const TEMPLATE: &str = "\
Draft a blog post for a photography studio about: {{ topic }}
{% if tone %}Write in a {{ tone }} tone.
{% endif %}{% if keywords %}Work these keywords in naturally:
{% for keyword in keywords %}- {{ keyword }}
{% endfor %}{% endif %}
The post should read like it was written by the photographer. Produce a
title, the post body in Markdown, a one-sentence excerpt for the listing
page, and three to five tags.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftedPost {
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

fn input_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required("topic", Schema::string()),
        SchemaField::optional(
            "tone",
            Schema::string_enum(["casual", "formal", "playful"]).describe("writing tone"),
        ),
        SchemaField::required("keywords", Schema::array(Schema::string())),
    ])
}

fn output_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required("title", Schema::string()),
        SchemaField::required("body", Schema::string().describe("post body in Markdown")),
        SchemaField::required("excerpt", Schema::string()),
        SchemaField::required("tags", Schema::array(Schema::string())),
    ])
}

pub fn definition() -> Result<FlowDefinition> {
    FlowDefinition::new(
        NAME,
        "Draft a blog post for the studio",
        input_schema(),
        output_schema(),
        TEMPLATE,
    )
}

/// Draft a blog post on the given topic
pub async fn draft_post(engine: &FlowEngine, request: &BlogRequest) -> Result<DraftedPost> {
    let input = serde_json::to_value(request)
        .map_err(|e| FlowError::input_validation(NAME, "$", e.to_string()))?;
    let output = engine.invoke(NAME, input).await?;
    serde_json::from_value(output)
        .map_err(|e| FlowError::output_validation(NAME, "$", e.to_string()))
}
