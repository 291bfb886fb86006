//! Tests for the admin dashboard endpoints.

mod dashboard;
mod diagnostics;
mod mutation;

use super::*;
