//! Utility extractors for controller request handling.
//!
//! This module provides the request extractors that resolve the signed-in principal from the
//! admin session cookie.

pub mod caller;
