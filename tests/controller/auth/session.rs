use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use transit::{
    model::user::{PrincipalDto, SessionRequestDto},
    server::controller::auth::{create_session, delete_session},
};

use super::*;

/// Expect a valid token to set a session cookie mirroring its one hour lifetime
#[tokio::test]
async fn sets_cookie_for_valid_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let result = create_session(State(state), Json(SessionRequestDto { token: token.clone() })).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = set_cookie(&resp);
    assert_eq!(cookie.name(), "adminSession");
    assert_eq!(cookie.value(), token);
    assert_eq!(cookie.path(), Some("/"));
    assert!((3598..=3600).contains(&max_age_seconds(&cookie)));

    let principal: PrincipalDto = read_json(resp).await?;
    assert_eq!(principal.uid, "admin-test");
    assert!(principal.admin);

    Ok(())
}

/// Expect a token signed with another secret to be rejected and the cookie cleared
#[tokio::test]
async fn clears_cookie_for_foreign_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let foreign = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &factory::identity_claims("intruder", true, chrono::Utc::now(), chrono::Duration::hours(1)),
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
    )?;

    let result = create_session(State(state), Json(SessionRequestDto { token: foreign })).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = set_cookie(&resp);
    assert_eq!(cookie.value(), "");
    assert_eq!(max_age_seconds(&cookie), 0);

    Ok(())
}

/// Expect an expired token to be rejected
#[tokio::test]
async fn clears_cookie_for_expired_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let expired = test
        .identity()
        .mint_token("admin-test", true, chrono::Duration::minutes(-5))?;

    let result = create_session(State(state), Json(SessionRequestDto { token: expired })).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(max_age_seconds(&set_cookie(&resp)), 0);

    Ok(())
}

/// Expect signing out to clear the session cookie
#[tokio::test]
async fn delete_clears_cookie() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();

    let resp = delete_session(State(state)).await.into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = set_cookie(&resp);
    assert_eq!(cookie.name(), "adminSession");
    assert_eq!(max_age_seconds(&cookie), 0);

    Ok(())
}

/// Expect the session route to be reachable through the router
#[tokio::test]
async fn routed_session_round_trip() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().user_token()?;

    let mut request = request(
        Method::POST,
        "/api/auth/session",
        None,
        json_body(&SessionRequestDto { token })?,
    );
    request.headers_mut().insert(
        axum::http::header::CONTENT_TYPE,
        "application/json".parse().unwrap(),
    );
    let resp = send(&state, request).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let principal: PrincipalDto = read_json(resp).await?;
    assert_eq!(principal.uid, "user-test");
    assert!(!principal.admin);

    Ok(())
}
