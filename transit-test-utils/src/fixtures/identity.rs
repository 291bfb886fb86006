use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{
    constant::{TEST_ADMIN_UID, TEST_USER_UID},
    error::TestError,
    fixtures::factory,
    TestContext,
};

impl TestContext {
    pub fn identity<'a>(&'a self) -> IdentityFixtures<'a> {
        IdentityFixtures { setup: self }
    }
}

pub struct IdentityFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> IdentityFixtures<'a> {
    /// Sign an identity token for `uid` expiring `ttl` from now.
    ///
    /// A negative `ttl` produces an already expired token.
    pub fn mint_token(&self, uid: &str, admin: bool, ttl: Duration) -> Result<String, TestError> {
        let claims = factory::identity_claims(uid, admin, Utc::now(), ttl);

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.setup.identity_secret.as_bytes()),
        )?)
    }

    /// One hour token carrying the admin claim.
    pub fn admin_token(&self) -> Result<String, TestError> {
        self.mint_token(TEST_ADMIN_UID, true, Duration::hours(1))
    }

    /// One hour token for a signed-in user without the admin claim.
    pub fn user_token(&self) -> Result<String, TestError> {
        self.mint_token(TEST_USER_UID, false, Duration::hours(1))
    }
}
