//! Route, alert and driver documents as they appear on the wire.
//!
//! Field names follow the stored documents (`nombre`, `duracionMin`, `tarifaCRC`, ...) so
//! existing records deserialize unchanged.

use serde::{Deserialize, Serialize};

/// Name of the collection holding [`RouteDto`] documents.
pub const ROUTES_COLLECTION: &str = "routes";
/// Name of the collection holding [`AlertDto`] documents.
pub const ALERTS_COLLECTION: &str = "alerts";
/// Name of the collection holding [`DriverDto`] documents.
pub const DRIVERS_COLLECTION: &str = "drivers";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RouteCategory {
    Grecia,
    Sarchi,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum DriverStatus {
    Active,
    Inactive,
    OnLeave,
}

/// A bus route with its schedule images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RouteDto {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especificacion", default)]
    pub description: String,
    pub category: RouteCategory,
    #[serde(rename = "duracionMin")]
    pub duration_min: u32,
    #[serde(rename = "tarifaCRC")]
    pub fare_crc: f64,
    #[serde(
        rename = "imagenHorarioUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule_image_url: Option<String>,
    #[serde(
        rename = "imagenTarjetaUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub card_image_url: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

/// Fields accepted when creating a route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RouteData {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especificacion", default)]
    pub description: String,
    pub category: RouteCategory,
    #[serde(rename = "duracionMin")]
    pub duration_min: u32,
    #[serde(rename = "tarifaCRC")]
    pub fare_crc: f64,
    #[serde(
        rename = "imagenHorarioUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule_image_url: Option<String>,
    #[serde(
        rename = "imagenTarjetaUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub card_image_url: Option<String>,
}

/// Partial route update; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RoutePatch {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "especificacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<RouteCategory>,
    #[serde(rename = "duracionMin", default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    #[serde(rename = "tarifaCRC", default, skip_serializing_if = "Option::is_none")]
    pub fare_crc: Option<f64>,
    #[serde(
        rename = "imagenHorarioUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule_image_url: Option<String>,
    #[serde(
        rename = "imagenTarjetaUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub card_image_url: Option<String>,
}

/// A service alert shown on the landing page, newest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AlertDto {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AlertData {
    #[serde(rename = "titulo")]
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AlertPatch {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A driver record. Everything beyond the name is optional so older documents still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DriverDto {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub last_updated: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DriverData {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DriverPatch {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Everything the public landing page renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct LandingDto {
    pub routes: Vec<RouteDto>,
    pub alerts: Vec<AlertDto>,
}

/// Admin dashboard payload. `drivers` is empty for signed-in users without the admin claim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub routes: Vec<RouteDto>,
    pub alerts: Vec<AlertDto>,
    pub drivers: Vec<DriverDto>,
    pub is_admin: bool,
}
