//! Error types for the transit server application.
//!
//! Domain errors (authentication, configuration, document/blob store) are defined with
//! `thiserror` and aggregated into [`Error`]. Every error implements `IntoResponse` so
//! controllers can return them directly with `?`.

pub mod auth;
pub mod config;
pub mod store;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, store::StoreError},
};

/// Main error type for the transit server application.
///
/// Aggregates the domain-specific errors and external library errors so the `?` operator
/// works across services and controllers. The `IntoResponse` implementation delegates to the
/// domain error where one exists and falls back to a logged 500 otherwise.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (missing session, rejected token, missing admin claim).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Document or blob store error (permission denied, not found, invalid data).
    #[error(transparent)]
    StoreError(#[from] StoreError),
    /// Database error (query failures, connection issues, migrations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// JSON (de)serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Filesystem error.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::StoreError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details never reach the
/// client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
