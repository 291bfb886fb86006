//! Test fixture modules for database records and identity tokens.
//!
//! - `document` - Documents of the `document` table
//! - `identity` - Signed identity tokens for admin and non-admin principals
//! - `factory` - Pure functions building document payloads with standard test values

pub mod document;
pub mod factory;
pub mod identity;
