//! Identity token and principal types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::user::PrincipalDto;

/// Claims carried by an identity token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Custom claim granting access to the admin dashboard.
    #[serde(default)]
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// A raw identity token together with its decoded claims.
#[derive(Clone, Debug, PartialEq)]
pub struct IdTokenResult {
    pub token: String,
    pub expiration_time: Option<DateTime<Utc>>,
    pub claims: IdentityClaims,
}

impl IdTokenResult {
    pub fn principal(&self) -> Principal {
        Principal::from(&self.claims)
    }
}

/// The signed-in user a request is made on behalf of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub admin: bool,
}

impl From<&IdentityClaims> for Principal {
    fn from(claims: &IdentityClaims) -> Self {
        Self {
            uid: claims.sub.clone(),
            email: claims.email.clone(),
            display_name: claims.name.clone(),
            admin: claims.admin,
        }
    }
}

impl From<&Principal> for PrincipalDto {
    fn from(principal: &Principal) -> Self {
        Self {
            uid: principal.uid.clone(),
            email: principal.email.clone(),
            display_name: principal.display_name.clone(),
            admin: principal.admin,
        }
    }
}
