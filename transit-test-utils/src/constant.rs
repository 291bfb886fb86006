//! Test configuration constants.
//!
//! These values are placeholders for tests only and never used outside of them.

/// Secret used to sign identity tokens in tests.
///
/// Pass the same value to the server's identity service so tokens minted through
/// [`TestContext`](crate::TestContext) verify.
pub static TEST_IDENTITY_SECRET: &str = "transit-test-identity-secret";

/// URL prefix uploaded files are served from in tests.
pub static TEST_UPLOAD_PUBLIC_URL: &str = "/uploads";

/// Identifier of the admin principal used by token helpers.
pub static TEST_ADMIN_UID: &str = "admin-test";

/// Identifier of the signed-in, non-admin principal used by token helpers.
pub static TEST_USER_UID: &str = "user-test";
