//! Server application models and type definitions.
//!
//! This module contains the application state shared by controllers, the structured
//! permission error, the query descriptor used by live and one-shot reads, identity token
//! types, and the timestamp forms documents may carry.

pub mod app;
pub mod permission;
pub mod query;
pub mod session;
pub mod timestamp;
