//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/auth/sign-in` - Exchange the admin email and password for an identity token
/// - `POST /api/auth/session` - Exchange an identity token for the admin session cookie
/// - `DELETE /api/auth/session` - Clear the admin session cookie
/// - `GET /api/auth/user` - Get the signed-in principal
/// - `GET /api/routes`, `GET /api/alerts`, `GET /api/landing` - Public landing data
/// - `GET /api/admin/dashboard` - Admin dashboard payload
/// - `POST|PUT|DELETE /api/admin/{routes,drivers,alerts}` - Dashboard mutations
/// - `POST /api/admin/uploads/{folder}` - Image upload
/// - `GET /api/admin/diagnostics/permission-errors` - Recent permission errors
/// - `GET /api/live/{collection}` - Live collection stream (server-sent events)
/// - `GET /uploads/{folder}/{key}` - Uploaded files
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Returns
/// An Axum `Router<AppState>` ready to be merged into the main application router.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Transit", description = "Transit API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Admin session cookie routes"),
        (name = controller::public::PUBLIC_TAG, description = "Public route & alert data"),
        (name = controller::admin::ADMIN_TAG, description = "Admin dashboard routes"),
        (name = controller::live::LIVE_TAG, description = "Live collection streams"),
        (name = controller::upload::UPLOAD_TAG, description = "Uploaded files"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::sign_in))
        .routes(routes!(
            controller::auth::create_session,
            controller::auth::delete_session
        ))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::public::get_routes))
        .routes(routes!(controller::public::get_alerts))
        .routes(routes!(controller::public::get_landing))
        .routes(routes!(controller::admin::get_dashboard))
        .routes(routes!(controller::admin::create_route))
        .routes(routes!(
            controller::admin::update_route,
            controller::admin::delete_route
        ))
        .routes(routes!(controller::admin::create_driver))
        .routes(routes!(
            controller::admin::update_driver,
            controller::admin::delete_driver
        ))
        .routes(routes!(controller::admin::create_alert))
        .routes(routes!(
            controller::admin::update_alert,
            controller::admin::delete_alert
        ))
        .routes(routes!(controller::admin::upload_file))
        .routes(routes!(controller::admin::get_permission_errors))
        .routes(routes!(controller::live::subscribe))
        .routes(routes!(controller::upload::get_upload))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
