//! Image moderation flow
//!
//! Screens an uploaded photo (as a data URI) before it becomes publicly
//! visible in a gallery. The model judges appropriateness for a portfolio
//! site and explains its decision.

use crate::error::{FlowError, Result};
use crate::flow::{FlowDefinition, FlowEngine};
use crate::schema::{Schema, SchemaField};
use serde::{Deserialize, Serialize};

pub const NAME: &str = "moderate-image";

const TEMPLATE: &str = "\
You are moderating photo uploads for a professional photography portfolio.
Judge whether the following image is appropriate for public display on a
family-friendly business website.

Image: {{ photoDataUri }}

Answer with whether the image is appropriate and a short reason.";

/// Moderation request for one uploaded image
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    /// The image as a `data:` URI including MIME type and base64 payload
    pub photo_data_uri: String,
}

/// The model's moderation verdict
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    pub is_appropriate: bool,
    pub reason: String,
}

fn input_schema() -> Schema {
    Schema::object(vec![SchemaField::required(
        "photoDataUri",
        Schema::string().describe("the photo as a data URI"),
    )])
}

fn output_schema() -> Schema {
    Schema::object(vec![
        SchemaField::required(
            "isAppropriate",
            Schema::boolean().describe("whether the image may be shown publicly"),
        ),
        SchemaField::required("reason", Schema::string().describe("short justification")),
    ])
}

pub fn definition() -> Result<FlowDefinition> {
    FlowDefinition::new(
        NAME,
        "Screen an uploaded photo for public display",
        input_schema(),
        output_schema(),
        TEMPLATE,
    )
}

/// Moderate one uploaded image
pub async fn moderate_image(
    engine: &FlowEngine,
    request: &ModerationRequest,
) -> Result<ModerationVerdict> {
    let input = serde_json::to_value(request)
        .map_err(|e| FlowError::input_validation(NAME, "$", e.to_string()))?;
    let output = engine.invoke(NAME, input).await?;
    serde_json::from_value(output)
        .map_err(|e| FlowError::output_validation(NAME, "$", e.to_string()))
}
