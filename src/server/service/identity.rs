//! Identity token issuing and verification.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::server::{
    error::auth::AuthError,
    model::session::{IdTokenResult, IdentityClaims, Principal},
};

/// Lifetime of identity tokens issued by [`IdentityService::issue`].
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// User id of the principal signed in through the configured admin credential.
pub const CREDENTIAL_ADMIN_UID: &str = "admin";

/// Email and password accepted by [`IdentityService::sign_in`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredential {
    pub email: String,
    pub password: String,
}

impl AdminCredential {
    /// Emails compare case-insensitively, passwords exactly.
    fn matches(&self, email: &str, password: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim()) && self.password == password
    }
}

/// Signs and verifies HS256 identity tokens carrying the `admin` custom claim.
#[derive(Clone)]
pub struct IdentityService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    admin_credential: Option<AdminCredential>,
}

impl IdentityService {
    /// Creates a new instance of [`IdentityService`].
    ///
    /// # Arguments
    /// - `secret` - Shared HMAC secret used to sign and verify tokens
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS),
            admin_credential: None,
        }
    }

    /// Enables [`IdentityService::sign_in`] for `credential`.
    pub fn with_admin_credential(mut self, credential: AdminCredential) -> Self {
        self.admin_credential = Some(credential);
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issues a token for `principal` valid from `now` for the configured lifetime.
    pub fn issue(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<IdTokenResult, AuthError> {
        let expires_at = now + self.ttl;
        let claims = IdentityClaims {
            sub: principal.uid.clone(),
            email: principal.email.clone(),
            name: principal.display_name.clone(),
            admin: principal.admin,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::TokenSigning)?;

        Ok(IdTokenResult {
            token,
            expiration_time: Some(expires_at),
            claims,
        })
    }

    /// Exchanges the admin email and password for a fresh identity token with the `admin`
    /// claim set.
    ///
    /// # Returns
    /// - `Ok(IdTokenResult)` - Credentials match the configured admin credential
    /// - `Err(AuthError::InvalidCredentials)` - Credentials differ or sign-in is not configured
    pub fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IdTokenResult, AuthError> {
        let Some(credential) = &self.admin_credential else {
            return Err(AuthError::InvalidCredentials);
        };
        if !credential.matches(email, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let principal = Principal {
            uid: CREDENTIAL_ADMIN_UID.to_string(),
            email: Some(credential.email.clone()),
            display_name: None,
            admin: true,
        };

        self.issue(&principal, now)
    }

    /// Verifies the signature and expiry of `token` and returns its decoded form.
    ///
    /// # Returns
    /// - `Ok(IdTokenResult)` - Token is authentic and unexpired
    /// - `Err(AuthError::InvalidToken)` - Signature, format or expiry check failed
    pub fn verify(&self, token: &str) -> Result<IdTokenResult, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<IdentityClaims>(token, &self.decoding_key, &validation)?;
        let expiration_time = Utc.timestamp_opt(data.claims.exp, 0).single();

        Ok(IdTokenResult {
            token: token.to_string(),
            expiration_time,
            claims: data.claims,
        })
    }
}
