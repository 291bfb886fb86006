//! Structured permission errors.
//!
//! A [`PermissionError`] is created the moment a store operation is denied by the access
//! rules and is published on the [`ErrorChannel`](crate::server::events::ErrorChannel) so a
//! diagnostic surface can show what was attempted. It is never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of store operation that was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read of a single document.
    Get,
    /// Query over a collection.
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };

        f.write_str(name)
    }
}

/// Denied store operation with enough context for a developer-facing diagnostic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionError {
    /// Message of the underlying denial.
    pub message: String,
    /// Path of the document or collection the operation targeted, e.g. `drivers` or
    /// `routes/grecia-centro`.
    pub ref_path: String,
    pub operation: Operation,
    /// Payload the caller attempted to write, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub resource: Option<Value>,
}

impl PermissionError {
    pub fn new(
        message: impl Into<String>,
        ref_path: impl Into<String>,
        operation: Operation,
        resource: Option<Value>,
    ) -> Self {
        Self {
            message: message.into(),
            ref_path: ref_path.into(),
            operation,
            resource,
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (operation: {}, path: {})",
            self.message, self.operation, self.ref_path
        )
    }
}

impl std::error::Error for PermissionError {}
