//! Tests for the live collection stream.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, StatusCode},
    response::Response,
};
use futures::StreamExt;
use serde_json::Value;
use transit::server::model::permission::Operation;

use super::*;

/// Reads the next server-sent event from `response` and returns its JSON data.
async fn next_event(stream: &mut axum::body::BodyDataStream) -> Value {
    let chunk = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = String::from_utf8(chunk.to_vec()).unwrap();

    assert!(text.contains("event: snapshot"));
    let data = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();

    serde_json::from_str(data).unwrap()
}

fn data_stream(response: Response) -> axum::body::BodyDataStream {
    response.into_body().into_data_stream()
}

/// Expect the first event to carry the ordered collection and later writes to follow
#[tokio::test]
async fn streams_snapshots() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_route("sarchi-norte", "Sarchí Norte", "sarchi")
        .with_route("grecia-centro", "Grecia-Centro", "grecia")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let resp = send(
        &state,
        request(Method::GET, "/api/live/routes", None, Body::empty()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let mut stream = data_stream(resp);

    let first = next_event(&mut stream).await;
    assert_eq!(first["loading"], false);
    assert_eq!(first["items"][0]["id"], "grecia-centro");
    assert_eq!(first["items"][1]["nombre"], "Sarchí Norte");

    let admin = transit::server::model::session::Principal {
        uid: "admin-test".to_string(),
        email: None,
        display_name: None,
        admin: true,
    };
    let deleted = state.gateway(Some(&admin)).delete_route("sarchi-norte").await;
    assert!(deleted.success);

    let second = next_event(&mut stream).await;
    assert_eq!(second["items"].as_array().map(Vec::len), Some(1));

    Ok(())
}

/// Expect an anonymous drivers subscription to end with the error and be recorded
#[tokio::test]
async fn denied_subscription_reports_error() -> Result<(), TestError> {
    let test = TestBuilder::new().with_driver("d1", "Ana").build().await?;
    let state: AppState = test.to_app_state();

    let resp = send(
        &state,
        request(Method::GET, "/api/live/drivers", None, Body::empty()),
    )
    .await;
    let mut stream = data_stream(resp);

    let event = next_event(&mut stream).await;
    assert!(event["error"].is_string());
    assert!(event["items"].is_null());

    let end = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .unwrap();
    assert!(end.is_none());

    let recorded = state.permission_log.recent();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].operation, Operation::List);
    assert_eq!(recorded[0].ref_path, "drivers");

    Ok(())
}

/// Expect unknown collections to be rejected before streaming
#[tokio::test]
async fn unknown_collection_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();

    let resp = send(
        &state,
        request(Method::GET, "/api/live/users", None, Body::empty()),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
