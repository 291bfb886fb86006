//! Helpers shared by the controller integration tests.

use axum::{
    body::{to_bytes, Body},
    http::{header::COOKIE, Method, Request},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use transit::server::{model::app::AppState, router, service::session::SESSION_COOKIE_NAME};
use transit_test_utils::prelude::*;

/// Full API router over the state of `test`.
pub fn app(state: &AppState) -> Router {
    router::routes().with_state(state.clone())
}

/// Builds a request, attaching the admin session cookie when `token` is given.
pub fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, token));
    }

    builder.body(body).unwrap()
}

/// Builds a JSON request body for `value`.
pub fn json_body<T: serde::Serialize>(value: &T) -> Result<Body, TestError> {
    Ok(Body::from(serde_json::to_vec(value)?))
}

/// Sends `request` through a fresh router over `state`.
pub async fn send(state: &AppState, request: Request<Body>) -> Response {
    app(state).oneshot(request).await.unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, TestError> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Ok(serde_json::from_slice(&bytes)?)
}
