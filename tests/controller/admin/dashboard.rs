use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
};
use transit::{
    model::transit::DashboardDto,
    server::controller::{admin::get_dashboard, util::caller::Caller},
};

use super::*;

/// Expect 401 for anonymous visitors
#[tokio::test]
async fn requires_sign_in() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;

    let result = get_dashboard(State(test.to_app_state()), Caller(None)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect drivers only for admins; other signed-in users see an empty list
#[tokio::test]
async fn drivers_only_for_admins() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_route("grecia-centro", "Grecia-Centro", "grecia")
        .with_alert("a1", "Cierre parcial")
        .with_driver("d1", "Ana")
        .build()
        .await?;
    let state: AppState = test.to_app_state();
    let admin_token = test.identity().admin_token()?;
    let user_token = test.identity().user_token()?;

    let admin_resp = send(
        &state,
        request(Method::GET, "/api/admin/dashboard", Some(&admin_token), Body::empty()),
    )
    .await;
    let user_resp = send(
        &state,
        request(Method::GET, "/api/admin/dashboard", Some(&user_token), Body::empty()),
    )
    .await;

    assert_eq!(admin_resp.status(), StatusCode::OK);
    assert_eq!(user_resp.status(), StatusCode::OK);

    let admin: DashboardDto = read_json(admin_resp).await?;
    let user: DashboardDto = read_json(user_resp).await?;
    assert!(admin.is_admin);
    assert_eq!(admin.drivers.len(), 1);
    assert!(!user.is_admin);
    assert!(user.drivers.is_empty());
    assert_eq!(user.routes, admin.routes);
    assert_eq!(user.alerts.len(), 1);

    Ok(())
}

/// Expect a dashboard write to be visible on the next dashboard load
#[tokio::test]
async fn reflects_writes_after_invalidation() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_driver("d1", "Ana")
        .build()
        .await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let before: DashboardDto = read_json(
        send(
            &state,
            request(Method::GET, "/api/admin/dashboard", Some(&token), Body::empty()),
        )
        .await,
    )
    .await?;
    assert_eq!(before.drivers.len(), 1);

    send(
        &state,
        request(Method::DELETE, "/api/admin/drivers/d1", Some(&token), Body::empty()),
    )
    .await;

    let after: DashboardDto = read_json(
        send(
            &state,
            request(Method::GET, "/api/admin/dashboard", Some(&token), Body::empty()),
        )
        .await,
    )
    .await?;
    assert!(after.drivers.is_empty());

    Ok(())
}
