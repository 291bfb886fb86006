//! Session bridge between identity tokens and the `adminSession` cookie.
//!
//! Whenever the identity state changes, the bridge produces the cookie the browser should
//! hold: the raw identity token with a `Max-Age` matching the token's remaining lifetime, or
//! a clearing cookie when there is no identity or its token cannot be obtained. Any failure
//! clears the cookie so a stale session is never left behind.

use std::future::Future;

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use tower_sessions::cookie::{Cookie, SameSite};

use crate::server::{
    error::auth::AuthError,
    model::session::{IdTokenResult, Principal},
    service::identity::IdentityService,
};

/// Name of the cookie carrying the identity token.
pub const SESSION_COOKIE_NAME: &str = "adminSession";
/// Max-Age used when the token's expiration is unknown.
pub const DEFAULT_SESSION_MAX_AGE_SECONDS: i64 = 3600;

/// A signed-in identity able to produce a (possibly refreshed) identity token.
pub trait IdentityUser {
    fn id_token_result(&self) -> impl Future<Output = Result<IdTokenResult, AuthError>> + Send;
}

/// Identity backed by a token presented by the browser, verified on demand.
pub struct PresentedToken<'a> {
    identity: &'a IdentityService,
    token: String,
}

impl<'a> PresentedToken<'a> {
    pub fn new(identity: &'a IdentityService, token: impl Into<String>) -> Self {
        Self {
            identity,
            token: token.into(),
        }
    }
}

impl IdentityUser for PresentedToken<'_> {
    fn id_token_result(&self) -> impl Future<Output = Result<IdTokenResult, AuthError>> + Send {
        let result = self.identity.verify(&self.token);

        async move { result }
    }
}

/// Cookie to set plus the principal it represents, if any.
#[derive(Debug)]
pub struct BridgeOutcome {
    pub cookie: Cookie<'static>,
    pub principal: Option<Principal>,
    /// Failure that forced the cookie to be cleared.
    pub error: Option<AuthError>,
}

#[derive(Clone, Copy, Debug)]
pub struct SessionBridge {
    secure: bool,
}

impl SessionBridge {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// `Secure` cookies in release builds, plain ones during local development.
    pub fn for_build() -> Self {
        Self::new(!cfg!(debug_assertions))
    }

    /// Computes the cookie for the new identity state.
    ///
    /// # Arguments
    /// - `user` - Current identity, `None` once signed out
    /// - `now` - Instant the remaining token lifetime is measured from
    pub async fn on_id_token_changed<U: IdentityUser>(
        &self,
        user: Option<&U>,
        now: DateTime<Utc>,
    ) -> BridgeOutcome {
        let Some(user) = user else {
            tracing::debug!("No identity, clearing session cookie");

            return BridgeOutcome {
                cookie: self.cleared_cookie(),
                principal: None,
                error: None,
            };
        };

        match user.id_token_result().await {
            Ok(result) => BridgeOutcome {
                cookie: self.session_cookie(&result, now),
                principal: Some(result.principal()),
                error: None,
            },
            Err(err) => {
                tracing::debug!("Failed to obtain identity token, clearing session cookie: {}", err);

                BridgeOutcome {
                    cookie: self.cleared_cookie(),
                    principal: None,
                    error: Some(err),
                }
            }
        }
    }

    pub fn session_cookie(&self, result: &IdTokenResult, now: DateTime<Utc>) -> Cookie<'static> {
        let max_age = match result.expiration_time {
            Some(expires_at) => (expires_at - now).num_seconds().max(0),
            None => DEFAULT_SESSION_MAX_AGE_SECONDS,
        };

        self.cookie(result.token.clone(), max_age)
    }

    pub fn cleared_cookie(&self) -> Cookie<'static> {
        self.cookie(String::new(), 0)
    }

    fn cookie(&self, value: String, max_age: i64) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(max_age))
            .build()
    }
}
