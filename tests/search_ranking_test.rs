//! Search ranking flow behavior, including the empty-query fast path

use serde_json::json;
use shutterflow::flow::FlowEngine;
use shutterflow::flows::{self, search};
use shutterflow::testing::MockModel;
use std::sync::Arc;

fn engine_with(mock: &MockModel) -> FlowEngine {
    FlowEngine::new(
        Arc::new(mock.clone()),
        flows::builtin_flows().expect("builtin flows register"),
    )
}

#[tokio::test]
async fn empty_query_returns_all_candidates_without_a_model_call() {
    let mock = MockModel::builder().build();
    let engine = engine_with(&mock);

    let output = engine
        .invoke(
            search::NAME,
            json!({
                "query": "",
                "photos": [
                    { "id": "a", "title": "x" },
                    { "id": "b", "title": "y" },
                ],
            }),
        )
        .await
        .unwrap();

    assert_eq!(output, json!({ "photoIds": ["a", "b"] }));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn empty_query_with_no_candidates_returns_empty_ranking() {
    let mock = MockModel::builder().build();
    let engine = engine_with(&mock);

    let ranking = search::rank_photos(
        &engine,
        &search::SearchRequest {
            query: String::new(),
            photos: vec![],
        },
    )
    .await
    .unwrap();

    assert!(ranking.photo_ids.is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn non_empty_query_goes_through_the_model() -> anyhow::Result<()> {
    let mock = MockModel::builder()
        .with_response(search::NAME, json!({ "photoIds": ["b"] }))
        .build();
    let engine = engine_with(&mock);

    let ranking = search::rank_photos(
        &engine,
        &search::SearchRequest {
            query: "moody coastline".to_string(),
            photos: vec![
                search::PhotoCandidate {
                    id: "a".to_string(),
                    title: "Studio portrait".to_string(),
                    description: None,
                },
                search::PhotoCandidate {
                    id: "b".to_string(),
                    title: "Storm over the headland".to_string(),
                    description: Some("long exposure, slate sky".to_string()),
                },
            ],
        },
    )
    .await?;

    assert_eq!(ranking.photo_ids, vec!["b"]);
    assert_eq!(mock.call_count(), 1);

    let prompt = mock.last_prompt().expect("a prompt was rendered");
    assert!(prompt.contains("moody coastline"));
    assert!(prompt.contains("id: a, title: Studio portrait"));
    // description only appears for the candidate that has one
    assert!(prompt.contains("description: long exposure, slate sky"));
    assert_eq!(prompt.matches("description:").count(), 1);
    Ok(())
}

#[tokio::test]
async fn whitespace_query_is_not_the_fast_path() {
    // the fast path is exact: only the empty string skips the model
    let mock = MockModel::builder()
        .with_response(search::NAME, json!({ "photoIds": [] }))
        .build();
    let engine = engine_with(&mock);

    engine
        .invoke(
            search::NAME,
            json!({ "query": " ", "photos": [{ "id": "a", "title": "x" }] }),
        )
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 1);
}
