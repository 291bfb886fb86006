use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{error::InternalServerError, model::permission::Operation},
};

/// Failures reported by the document store, the blob store and their access rules.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The access rules rejected the operation for the current caller.
    #[error("Missing or insufficient permissions to {operation} {ref_path}")]
    PermissionDenied {
        operation: Operation,
        ref_path: String,
    },
    /// No document (or blob) exists at the given path.
    #[error("No document found at {0}")]
    NotFound(String),
    /// The request carried data the store will not accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl StoreError {
    pub fn permission_denied(operation: Operation, ref_path: impl Into<String>) -> Self {
        Self::PermissionDenied {
            operation,
            ref_path: ref_path.into(),
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => return InternalServerError(self).into_response(),
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
