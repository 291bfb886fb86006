use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No identity token present in the admin session cookie")]
    MissingSession,
    #[error("Identity token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("User {0:?} does not carry the admin claim")]
    NotAdmin(String),
    #[error("Admin sign-in rejected")]
    InvalidCredentials,
    #[error("Failed to sign identity token: {0}")]
    TokenSigning(jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession | Self::InvalidToken(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Please sign in again.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::InvalidCredentials => {
                tracing::debug!("{}", self);

                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Incorrect email or password.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::NotAdmin(ref uid) => {
                tracing::debug!(uid = %uid, "{}", self);

                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Administrator access is required.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::TokenSigning(_) => InternalServerError(self).into_response(),
        }
    }
}
