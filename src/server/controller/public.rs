use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        transit::{AlertDto, LandingDto, RouteDto},
    },
    server::{
        controller::util::caller::Caller, error::Error, model::app::AppState,
        service::view::ViewService,
    },
};

pub static PUBLIC_TAG: &str = "public";

/// Get all routes, sorted by name
#[utoipa::path(
    get,
    path = "/api/routes",
    tag = PUBLIC_TAG,
    responses(
        (status = 200, description = "Success when retrieving routes", body = Vec<RouteDto>),
        (status = 403, description = "Listing routes was denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_routes(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, Error> {
    let routes = ViewService::new(&state.store, &state.pages)
        .routes(caller.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(routes)))
}

/// Get all alerts, newest first
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = PUBLIC_TAG,
    responses(
        (status = 200, description = "Success when retrieving alerts", body = Vec<AlertDto>),
        (status = 403, description = "Listing alerts was denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_alerts(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, Error> {
    let alerts = ViewService::new(&state.store, &state.pages)
        .alerts(caller.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(alerts)))
}

/// Get the landing page payload
///
/// Served from the page cache until a route or alert write invalidates it.
#[utoipa::path(
    get,
    path = "/api/landing",
    tag = PUBLIC_TAG,
    responses(
        (status = 200, description = "Success when retrieving the landing page", body = LandingDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_landing(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let landing = ViewService::new(&state.store, &state.pages).landing().await?;

    Ok((StatusCode::OK, Json(landing)))
}
