use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ActionResult, ErrorDto},
        transit::{
            AlertData, AlertDto, AlertPatch, DashboardDto, DriverData, DriverDto, DriverPatch,
            RouteData, RouteDto, RoutePatch,
        },
    },
    server::{
        controller::util::caller::{AdminCaller, Caller},
        error::{auth::AuthError, Error},
        model::{app::AppState, permission::PermissionError},
        service::{mutation::FileUpload, view::ViewService},
    },
};

pub static ADMIN_TAG: &str = "admin";

/// Header carrying the original name of an uploaded file.
pub const FILE_NAME_HEADER: &str = "x-file-name";

const DEFAULT_UPLOAD_FILE_NAME: &str = "upload";
const DEFAULT_UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Get the admin dashboard payload
///
/// Requires a signed-in user. Drivers are only included for users carrying the admin claim.
///
/// # Responses
/// - 200 (Success): Routes, alerts and drivers visible to the caller
/// - 401 (Unauthorized): No valid session cookie
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Success when retrieving the dashboard", body = DashboardDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, Error> {
    let Some(caller) = caller else {
        return Err(AuthError::MissingSession.into());
    };

    let dashboard = ViewService::new(&state.store, &state.pages)
        .dashboard(&caller)
        .await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Create a route; its id is the slug of its name and description
#[utoipa::path(
    post,
    path = "/api/admin/routes",
    tag = ADMIN_TAG,
    request_body = RouteData,
    responses(
        (status = 200, description = "Outcome of the write, with the new route id", body = ActionResult<String>)
    ),
)]
pub async fn create_route(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(data): Json<RouteData>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).create_route(data).await)
}

/// Update a route, returning the written document
#[utoipa::path(
    put,
    path = "/api/admin/routes/{id}",
    tag = ADMIN_TAG,
    params(("id" = String, Path, description = "Route id")),
    request_body = RoutePatch,
    responses(
        (status = 200, description = "Outcome of the write", body = ActionResult<RouteDto>)
    ),
)]
pub async fn update_route(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(patch): Json<RoutePatch>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).update_route(&id, patch).await)
}

#[utoipa::path(
    delete,
    path = "/api/admin/routes/{id}",
    tag = ADMIN_TAG,
    params(("id" = String, Path, description = "Route id")),
    responses(
        (status = 200, description = "Outcome of the delete")
    ),
)]
pub async fn delete_route(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).delete_route(&id).await)
}

#[utoipa::path(
    post,
    path = "/api/admin/drivers",
    tag = ADMIN_TAG,
    request_body = DriverData,
    responses(
        (status = 200, description = "Outcome of the write, with the new driver id", body = ActionResult<String>)
    ),
)]
pub async fn create_driver(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(data): Json<DriverData>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).create_driver(data).await)
}

#[utoipa::path(
    put,
    path = "/api/admin/drivers/{id}",
    tag = ADMIN_TAG,
    params(("id" = String, Path, description = "Driver id")),
    request_body = DriverPatch,
    responses(
        (status = 200, description = "Outcome of the write", body = ActionResult<DriverDto>)
    ),
)]
pub async fn update_driver(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(patch): Json<DriverPatch>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).update_driver(&id, patch).await)
}

#[utoipa::path(
    delete,
    path = "/api/admin/drivers/{id}",
    tag = ADMIN_TAG,
    params(("id" = String, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Outcome of the delete")
    ),
)]
pub async fn delete_driver(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).delete_driver(&id).await)
}

#[utoipa::path(
    post,
    path = "/api/admin/alerts",
    tag = ADMIN_TAG,
    request_body = AlertData,
    responses(
        (status = 200, description = "Outcome of the write, with the new alert id", body = ActionResult<String>)
    ),
)]
pub async fn create_alert(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(data): Json<AlertData>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).create_alert(data).await)
}

#[utoipa::path(
    put,
    path = "/api/admin/alerts/{id}",
    tag = ADMIN_TAG,
    params(("id" = String, Path, description = "Alert id")),
    request_body = AlertPatch,
    responses(
        (status = 200, description = "Outcome of the write", body = ActionResult<AlertDto>)
    ),
)]
pub async fn update_alert(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(patch): Json<AlertPatch>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).update_alert(&id, patch).await)
}

#[utoipa::path(
    delete,
    path = "/api/admin/alerts/{id}",
    tag = ADMIN_TAG,
    params(("id" = String, Path, description = "Alert id")),
    responses(
        (status = 200, description = "Outcome of the delete")
    ),
)]
pub async fn delete_alert(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(state.gateway(caller.as_ref()).delete_alert(&id).await)
}

/// Upload an image into `folder`, returning its public URL
///
/// The request body is the raw file. The original file name is read from the `X-File-Name`
/// header and the content type from `Content-Type`.
#[utoipa::path(
    post,
    path = "/api/admin/uploads/{folder}",
    tag = ADMIN_TAG,
    params(("folder" = String, Path, description = "Folder the file is stored under")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Outcome of the upload, with the public URL", body = ActionResult<String>)
    ),
)]
pub async fn upload_file(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(folder): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let file = (!body.is_empty()).then(|| FileUpload {
        file_name: header(FILE_NAME_HEADER)
            .unwrap_or_else(|| DEFAULT_UPLOAD_FILE_NAME.to_string()),
        content_type: header(CONTENT_TYPE.as_str())
            .unwrap_or_else(|| DEFAULT_UPLOAD_CONTENT_TYPE.to_string()),
        bytes: body.to_vec(),
    });

    Json(state.gateway(caller.as_ref()).upload_file(file, &folder).await)
}

/// Get the most recent permission errors, newest first
///
/// # Responses
/// - 200 (Success): Recorded permission errors
/// - 401 (Unauthorized): No valid session cookie
/// - 403 (Forbidden): Caller lacks the admin claim
#[utoipa::path(
    get,
    path = "/api/admin/diagnostics/permission-errors",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Recent permission errors", body = Vec<PermissionError>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Administrator access is required", body = ErrorDto)
    ),
)]
pub async fn get_permission_errors(
    State(state): State<AppState>,
    AdminCaller(_admin): AdminCaller,
) -> impl IntoResponse {
    Json(state.permission_log.recent())
}
