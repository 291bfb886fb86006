use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    model::api::ErrorDto,
    server::{error::Error, model::app::AppState},
};

pub static UPLOAD_TAG: &str = "upload";

#[derive(Deserialize)]
pub struct DownloadParams {
    pub token: Option<String>,
}

/// Serve an uploaded file
///
/// Public uploads need no token; private ones require the download token that was returned
/// with their URL.
///
/// # Responses
/// - 200 (Success): File contents with their stored content type
/// - 403 (Forbidden): Missing or wrong download token
/// - 404 (Not Found): No such upload
#[utoipa::path(
    get,
    path = "/uploads/{folder}/{key}",
    tag = UPLOAD_TAG,
    params(
        ("folder" = String, Path, description = "Upload folder"),
        ("key" = String, Path, description = "Object key returned by the upload"),
        ("token" = Option<String>, Query, description = "Download token of a private upload")
    ),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 403, description = "Download token rejected", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto)
    ),
)]
pub async fn get_upload(
    State(state): State<AppState>,
    Path((folder, key)): Path<(String, String)>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, Error> {
    let object = state
        .blobs
        .get(&folder, &key, params.token.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, object.content_type)],
        object.bytes,
    ))
}
