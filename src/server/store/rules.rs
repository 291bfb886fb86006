use crate::{
    model::transit::{ALERTS_COLLECTION, DRIVERS_COLLECTION, ROUTES_COLLECTION},
    server::{
        error::store::StoreError,
        model::{permission::Operation, session::Principal},
    },
};

/// Folder prefix under which uploaded blobs are authorized.
pub const UPLOADS_RESOURCE: &str = "uploads";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Public,
    Admin,
    Deny,
}

/// Server-side authorization evaluated for every store operation.
///
/// | resource  | read   | write |
/// |-----------|--------|-------|
/// | `routes`  | public | admin |
/// | `alerts`  | public | admin |
/// | `drivers` | admin  | admin |
/// | `uploads` | public | admin |
///
/// Anything else is denied.
#[derive(Clone, Debug, Default)]
pub struct AccessRules;

impl AccessRules {
    pub fn check(
        &self,
        caller: Option<&Principal>,
        operation: Operation,
        resource: &str,
        ref_path: &str,
    ) -> Result<(), StoreError> {
        let allowed = match Self::access(resource, operation) {
            Access::Public => true,
            Access::Admin => caller.map(|principal| principal.admin).unwrap_or(false),
            Access::Deny => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(StoreError::permission_denied(operation, ref_path))
        }
    }

    fn access(resource: &str, operation: Operation) -> Access {
        let read = matches!(operation, Operation::Get | Operation::List);

        match resource {
            ROUTES_COLLECTION | ALERTS_COLLECTION | UPLOADS_RESOURCE if read => Access::Public,
            ROUTES_COLLECTION | ALERTS_COLLECTION | UPLOADS_RESOURCE | DRIVERS_COLLECTION => {
                Access::Admin
            }
            _ => Access::Deny,
        }
    }
}
