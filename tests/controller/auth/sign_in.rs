use axum::http::{Method, StatusCode};
use transit::{
    model::{
        transit::DashboardDto,
        user::{IdTokenDto, PrincipalDto, SessionRequestDto, SignInRequestDto},
    },
    server::service::identity::AdminCredential,
};

use super::*;

const EMAIL: &str = "oficina@transportes.example";
const PASSWORD: &str = "horario-2025";

fn state_with_credential(test: &TestContext) -> AppState {
    let mut state: AppState = test.to_app_state();
    state.identity = state.identity.clone().with_admin_credential(AdminCredential {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    });

    state
}

fn sign_in_body(password: &str) -> Result<axum::body::Body, TestError> {
    json_body(&SignInRequestDto {
        email: EMAIL.to_string(),
        password: password.to_string(),
    })
}

/// Expect signing in, exchanging the token for a cookie and opening the dashboard to work end to end
#[tokio::test]
async fn signs_in_through_session_cookie() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_route("grecia-centro", "Grecia-Centro", "grecia")
        .with_driver("d1", "Ana")
        .build()
        .await?;
    let state = state_with_credential(&test);

    let resp = send(
        &state,
        request(Method::POST, "/api/auth/sign-in", None, sign_in_body(PASSWORD)?),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issued: IdTokenDto = read_json(resp).await?;
    assert!(issued.expiration_time.is_some());

    let resp = send(
        &state,
        request(
            Method::POST,
            "/api/auth/session",
            None,
            json_body(&SessionRequestDto {
                token: issued.token.clone(),
            })?,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = set_cookie(&resp);
    let principal: PrincipalDto = read_json(resp).await?;
    assert_eq!(principal.email.as_deref(), Some(EMAIL));
    assert!(principal.admin);

    let resp = send(
        &state,
        request(
            Method::GET,
            "/api/admin/dashboard",
            Some(cookie.value()),
            axum::body::Body::empty(),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboard: DashboardDto = read_json(resp).await?;
    assert!(dashboard.is_admin);
    assert_eq!(dashboard.drivers.len(), 1);

    Ok(())
}

/// Expect a wrong password to be rejected without a token
#[tokio::test]
async fn rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state = state_with_credential(&test);

    let resp = send(
        &state,
        request(Method::POST, "/api/auth/sign-in", None, sign_in_body("adivina")?),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect sign-in to be unavailable when no admin credential is configured
#[tokio::test]
async fn rejects_when_not_configured() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();

    let resp = send(
        &state,
        request(Method::POST, "/api/auth/sign-in", None, sign_in_body(PASSWORD)?),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
