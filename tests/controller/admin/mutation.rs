use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, StatusCode},
};
use serde_json::{json, Value};
use transit::model::{api::ActionResult, transit::RouteDto};

use super::*;

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    value: &Value,
) -> Result<axum::http::Request<Body>, TestError> {
    let mut request = request(method, uri, token, json_body(value)?);
    request
        .headers_mut()
        .insert(CONTENT_TYPE, "application/json".parse().unwrap());

    Ok(request)
}

fn grecia_centro() -> Value {
    json!({
        "nombre": "Grecia-Centro",
        "category": "grecia",
        "duracionMin": 30,
        "tarifaCRC": 500
    })
}

/// Expect an admin to create a route under its slug and find it in the public list
#[tokio::test]
async fn admin_creates_route() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let resp = send(
        &state,
        json_request(Method::POST, "/api/admin/routes", Some(&token), &grecia_centro())?,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let result: ActionResult<String> = read_json(resp).await?;
    assert!(result.success);
    assert_eq!(result.data.as_deref(), Some("grecia-centro"));

    let routes: Vec<RouteDto> = read_json(
        send(&state, request(Method::GET, "/api/routes", None, Body::empty())).await,
    )
    .await?;
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].id, "grecia-centro");
    assert_eq!(routes[0].duration_min, 30);

    Ok(())
}

/// Expect an update to return the merged document
#[tokio::test]
async fn admin_updates_route() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_route("grecia-centro", "Grecia-Centro", "grecia")
        .build()
        .await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let resp = send(
        &state,
        json_request(
            Method::PUT,
            "/api/admin/routes/grecia-centro",
            Some(&token),
            &json!({ "tarifaCRC": 650 }),
        )?,
    )
    .await;

    let result: ActionResult<RouteDto> = read_json(resp).await?;
    let route = result.data.unwrap();
    assert_eq!(route.fare_crc, 650.0);
    assert_eq!(route.name, "Grecia-Centro");

    Ok(())
}

/// Expect a second delete of the same alert to report failure
#[tokio::test]
async fn second_delete_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_alert("a1", "Cierre parcial")
        .build()
        .await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let first: ActionResult<()> = read_json(
        send(
            &state,
            request(Method::DELETE, "/api/admin/alerts/a1", Some(&token), Body::empty()),
        )
        .await,
    )
    .await?;
    let second: ActionResult<()> = read_json(
        send(
            &state,
            request(Method::DELETE, "/api/admin/alerts/a1", Some(&token), Body::empty()),
        )
        .await,
    )
    .await?;

    assert!(first.success);
    assert!(!second.success);
    assert!(second.error.is_some());

    Ok(())
}

/// Expect an anonymous write to be denied, recorded, and leave no document behind
#[tokio::test]
async fn anonymous_write_is_denied() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();

    let resp = send(
        &state,
        json_request(Method::POST, "/api/admin/drivers", None, &json!({ "nombre": "Ana" }))?,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let result: ActionResult<String> = read_json(resp).await?;
    assert!(!result.success);

    let recorded = state.permission_log.recent();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].ref_path.starts_with("drivers/"));
    assert_eq!(test.document().count_documents("drivers").await?, 0);

    Ok(())
}

/// Expect a signed-in user without the admin claim to be denied as well
#[tokio::test]
async fn non_admin_write_is_denied() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().user_token()?;

    let result: ActionResult<String> = read_json(
        send(
            &state,
            json_request(Method::POST, "/api/admin/routes", Some(&token), &grecia_centro())?,
        )
        .await,
    )
    .await?;

    assert!(!result.success);
    assert_eq!(state.permission_log.recent().len(), 1);
    assert_eq!(test.document().count_documents("routes").await?, 0);

    Ok(())
}
