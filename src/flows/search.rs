//! Photo search ranking flow
//!
//! Given a free-text query and a set of candidate photos, asks the model to
//! return the candidate ids ranked by relevance. An empty query skips the
//! model entirely and returns every candidate id in input order; this is an
//! explicit fast path for the browse-all case, not a general policy.

use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowEngine};
use crate::schema::{Schema, SchemaField};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const NAME: &str = "rank-photos";

const TEMPLATE: &str = "\
A visitor is searching a photography portfolio for: \"{{ query }}\"

Candidate photos:
{% for photo in photos %}- id: {{ photo.id }}, title: {{ photo.title }}\
{% if photo.description %}, description: {{ photo.description }}{% endif %}
{% endfor %}
Return the ids of the candidates ordered from most to least relevant to the
search. Omit photos that are clearly unrelated.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCandidate {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub photos: Vec<PhotoCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRanking {
    pub photo_ids: Vec<String>,
}

fn input_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required(
            "query",
            Schema::string().describe("free-text search query, may be empty"),
        ),
        SchemaField::required(
            "photos",
            Schema::array(Schema::object(vec![
                SchemaField::required("id", Schema::string()),
                SchemaField::required("title", Schema::string()),
                SchemaField::optional("description", Schema::string()),
            ])),
        ),
    ])
}

fn output_schema() -> Schema {
    Schema::object(vec![SchemaField::required(
        "photoIds",
        Schema::array(Schema::string()).describe("candidate ids, most relevant first"),
    )])
}

/// Empty query: every candidate id in input order, no model call
fn browse_all(input: &Value) -> Option<Value> {
    let query = input.get("query").and_then(Value::as_str)?;
    if !query.is_empty() {
        return None;
    }
    let ids: Vec<Value> = input
        .get("photos")
        .and_then(Value::as_array)
        .map(|photos| {
            photos
                .iter()
                .filter_map(|p| p.get("id").cloned())
                .collect()
        })
        .unwrap_or_default();
    Some(json!({ "photoIds": ids }))
}

pub fn definition() -> Result<FlowDefinition> {
    Ok(FlowDefinition::new(
        NAME,
        "Rank candidate photos against a search query",
        input_schema(),
        output_schema(),
        TEMPLATE,
    )?
    .with_fast_path(browse_all))
}

/// Rank candidate photos against a visitor's search query
pub async fn rank_photos(engine: &FlowEngine, request: &SearchRequest) -> Result<SearchRanking> {
    let input = serde_json::to_value(request)
        .map_err(|e| FlowError::input_validation(NAME, "$", e.to_string()))?;
    let output = engine.invoke(NAME, input).await?;
    serde_json::from_value(output)
        .map_err(|e| FlowError::output_validation(NAME, "$", e.to_string()))
}
