use axum::{extract::FromRequestParts, http::header::COOKIE, http::request::Parts};
use dioxus_logger::tracing;
use std::convert::Infallible;
use tower_sessions::cookie::Cookie;

use crate::server::{
    error::auth::AuthError,
    model::{app::AppState, session::Principal},
    service::session::SESSION_COOKIE_NAME,
};

/// Reads the identity token stored in the admin session cookie, if any.
fn session_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

/// Verifies the session cookie of the request against the identity service.
///
/// # Returns
/// - `Ok(Principal)`: Cookie present with a valid, unexpired identity token
/// - `Err(AuthError::MissingSession)`: No session cookie on the request
/// - `Err(AuthError::InvalidToken)`: Token signature, format or expiration rejected
fn resolve_principal(parts: &Parts, state: &AppState) -> Result<Principal, AuthError> {
    let token = session_token(parts).ok_or(AuthError::MissingSession)?;
    let result = state.identity.verify(&token)?;

    Ok(result.principal())
}

/// The principal a request is made on behalf of, or `None` for anonymous visitors.
///
/// An invalid or expired session cookie is treated as anonymous; the access rules decide what
/// an anonymous caller may do.
pub struct Caller(pub Option<Principal>);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_principal(parts, state) {
            Ok(principal) => Ok(Self(Some(principal))),
            Err(AuthError::MissingSession) => Ok(Self(None)),
            Err(err) => {
                tracing::debug!("Treating request as anonymous: {}", err);
                Ok(Self(None))
            }
        }
    }
}

/// A signed-in principal carrying the admin claim. Rejects with 401 or 403 otherwise.
pub struct AdminCaller(pub Principal);

impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = resolve_principal(parts, state)?;
        if !principal.admin {
            return Err(AuthError::NotAdmin(principal.uid));
        }

        Ok(Self(principal))
    }
}
