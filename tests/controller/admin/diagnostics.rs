use axum::{
    body::Body,
    http::{Method, StatusCode},
};
use transit::server::model::permission::{Operation, PermissionError};

use super::*;

const PATH: &str = "/api/admin/diagnostics/permission-errors";

/// Expect 401 without a session and 403 without the admin claim
#[tokio::test]
async fn requires_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().user_token()?;

    let anonymous = send(&state, request(Method::GET, PATH, None, Body::empty())).await;
    let user = send(&state, request(Method::GET, PATH, Some(&token), Body::empty())).await;

    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(user.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect recorded denials to be returned newest first
#[tokio::test]
async fn lists_recent_denials() -> Result<(), TestError> {
    let test = TestBuilder::new().with_driver("d1", "Ana").build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    send(
        &state,
        request(Method::DELETE, "/api/admin/drivers/d1", None, Body::empty()),
    )
    .await;
    send(
        &state,
        request(Method::DELETE, "/api/admin/alerts/a1", None, Body::empty()),
    )
    .await;

    let resp = send(&state, request(Method::GET, PATH, Some(&token), Body::empty())).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let errors: Vec<PermissionError> = read_json(resp).await?;
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].ref_path, "alerts/a1");
    assert_eq!(errors[1].ref_path, "drivers/d1");
    assert!(errors.iter().all(|error| error.operation == Operation::Delete));

    Ok(())
}
