use axum::{
    body::Body,
    http::{Method, StatusCode},
    response::IntoResponse,
};
use transit::{
    model::user::PrincipalDto,
    server::{
        controller::{auth::get_user, util::caller::Caller},
        model::session::Principal,
    },
};

use super::*;

/// Expect the principal behind a valid cookie to be returned
#[tokio::test]
async fn returns_principal_from_cookie() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let resp = send(
        &state,
        request(Method::GET, "/api/auth/user", Some(&token), Body::empty()),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let principal: PrincipalDto = read_json(resp).await?;
    assert_eq!(principal.uid, "admin-test");
    assert_eq!(principal.email.as_deref(), Some("admin-test@example.com"));

    Ok(())
}

/// Expect 404 without a session cookie
#[tokio::test]
async fn not_found_without_cookie() -> Result<(), TestError> {
    let resp = get_user(Caller(None)).await.into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect an expired cookie to be treated as signed out
#[tokio::test]
async fn not_found_with_expired_cookie() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let expired = test
        .identity()
        .mint_token("admin-test", true, chrono::Duration::minutes(-1))?;

    let resp = send(
        &state,
        request(Method::GET, "/api/auth/user", Some(&expired), Body::empty()),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the handler to echo the extracted principal
#[tokio::test]
async fn echoes_extracted_principal() -> Result<(), TestError> {
    let principal = Principal {
        uid: "u1".to_string(),
        email: None,
        display_name: Some("Oficina".to_string()),
        admin: false,
    };

    let resp = get_user(Caller(Some(principal))).await.into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let dto: PrincipalDto = read_json(resp).await?;
    assert_eq!(dto.display_name.as_deref(), Some("Oficina"));

    Ok(())
}
