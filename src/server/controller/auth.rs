use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};

use crate::{
    model::{
        api::ErrorDto,
        user::{IdTokenDto, PrincipalDto, SessionRequestDto, SignInRequestDto},
    },
    server::{
        controller::util::caller::Caller,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::session::{PresentedToken, SESSION_COOKIE_NAME},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Sign in with the configured admin email and password
///
/// Returns an identity token carrying the admin claim. The token does not sign the caller
/// in by itself; it is exchanged for the session cookie at `POST /api/auth/session`.
///
/// # Responses
/// - 200 (Success): Credentials accepted, returns the identity token
/// - 401 (Unauthorized): Credentials rejected or admin sign-in not configured
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    tag = AUTH_TAG,
    request_body = SignInRequestDto,
    responses(
        (status = 200, description = "Identity token issued", body = IdTokenDto),
        (status = 401, description = "Credentials rejected", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let issued = state
        .identity
        .sign_in(&request.email, &request.password, Utc::now())?;

    Ok((
        StatusCode::OK,
        Json(IdTokenDto {
            token: issued.token,
            expiration_time: issued
                .expiration_time
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }),
    ))
}

/// Exchange a freshly refreshed identity token for the admin session cookie
///
/// The cookie mirrors the remaining lifetime of the token. A token that fails verification
/// clears any existing session cookie.
///
/// # Responses
/// - 200 (Success): Cookie set, returns the signed-in principal
/// - 401 (Unauthorized): Token rejected, session cookie cleared
#[utoipa::path(
    post,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    request_body = SessionRequestDto,
    responses(
        (status = 200, description = "Session cookie set", body = PrincipalDto),
        (status = 401, description = "Identity token rejected", body = ErrorDto)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = PresentedToken::new(&state.identity, request.token);
    let outcome = state
        .session
        .on_id_token_changed(Some(&user), Utc::now())
        .await;
    let cookie = [(SET_COOKIE, outcome.cookie.to_string())];

    let Some(principal) = outcome.principal else {
        let err = outcome.error.unwrap_or(AuthError::MissingSession);

        return Ok((cookie, err).into_response());
    };

    Ok((
        StatusCode::OK,
        cookie,
        Json(PrincipalDto::from(&principal)),
    )
        .into_response())
}

/// Clears the admin session cookie
///
/// # Responses
/// - 204 (No Content): Cookie cleared
#[utoipa::path(
    delete,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Session cookie cleared")
    ),
)]
pub async fn delete_session(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = state
        .session
        .on_id_token_changed::<PresentedToken>(None, Utc::now())
        .await;

    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, outcome.cookie.to_string())],
    )
}

/// Get the principal behind the current `adminSession` cookie
///
/// # Responses
/// - 200 (Success): Signed in, returns the principal
/// - 404 (Not Found): No valid session cookie on the request
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Success when retrieving the signed-in principal", body = PrincipalDto),
        (status = 404, description = "Not signed in", body = ErrorDto)
    ),
)]
pub async fn get_user(Caller(caller): Caller) -> impl IntoResponse {
    match caller {
        Some(principal) => (StatusCode::OK, Json(PrincipalDto::from(&principal))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: format!("No valid {} cookie", SESSION_COOKIE_NAME),
            }),
        )
            .into_response(),
    }
}
