use serde::{Deserialize, Serialize};

/// Signed-in principal as seen by pages and the admin dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PrincipalDto {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub admin: bool,
}

/// Body of `POST /api/auth/session`: a freshly refreshed identity token.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SessionRequestDto {
    pub token: String,
}

/// Body of `POST /api/auth/sign-in`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SignInRequestDto {
    pub email: String,
    pub password: String,
}

/// A freshly issued identity token, ready to be exchanged at `POST /api/auth/session`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct IdTokenDto {
    pub token: String,
    /// RFC 3339 expiration of the token
    pub expiration_time: Option<String>,
}
