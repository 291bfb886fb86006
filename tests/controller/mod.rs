//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the application's HTTP controllers,
//! verifying cookie-based sessions, public and admin data, mutations, live streams,
//! uploads and error handling.

mod admin;
mod auth;
mod live;
mod public;
mod upload;

use transit::server::model::app::AppState;
use transit_test_utils::prelude::*;

use crate::util::*;
