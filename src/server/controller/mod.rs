//! HTTP controller endpoints for the transit web API.
//!
//! This module contains Axum handlers for the admin session cookie, the public landing data,
//! the admin dashboard mutations, live collection streams and uploaded files. Controllers
//! resolve the caller from the session cookie, delegate to services, and use utoipa for
//! OpenAPI documentation.

pub mod admin;
pub mod auth;
pub mod live;
pub mod public;
pub mod upload;
pub mod util;
