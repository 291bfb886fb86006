//! Server application core modules.
//!
//! This module contains all server-side functionality for the transit site: HTTP routing,
//! the admin session cookie, the document and blob stores with their access rules, live
//! collection synchronization, the permission error channel, and the mutation gateway used
//! by the admin dashboard.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod events;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod store;
pub mod sync;
pub mod util;
