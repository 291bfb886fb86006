//! Mutation gateway: the server actions behind the admin dashboard.
//!
//! Every operation returns an [`ActionResult`] and never propagates a failure past this
//! boundary. Writes stamp `lastUpdated` with the server timestamp, invalidate the cached views
//! that show the collection, and republish permission denials on the [`ErrorChannel`] with
//! the payload that was attempted.

use std::future::Future;

use dioxus_logger::tracing;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{
    model::{
        api::ActionResult,
        transit::{
            AlertData, AlertDto, AlertPatch, DriverData, DriverDto, DriverPatch, RouteData,
            RouteDto, RoutePatch, ALERTS_COLLECTION, DRIVERS_COLLECTION, ROUTES_COLLECTION,
        },
    },
    server::{
        error::store::StoreError,
        events::ErrorChannel,
        model::{
            permission::{Operation, PermissionError},
            session::Principal,
            timestamp::{server_timestamp, LAST_UPDATED_FIELD},
        },
        service::cache::{PageCache, DASHBOARD_PATH, LANDING_PATH},
        store::{
            blob::{BlobStore, BlobUpload},
            document_path,
            rules::UPLOADS_RESOURCE,
            DocumentStore,
        },
        util::slug::{random_id, slugify, GENERATED_ID_LEN},
    },
};

const NO_FILE_PROVIDED: &str = "No file provided.";

/// A file received from the admin upload form.
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Pages showing each collection, invalidated after a successful write.
fn affected_pages(collection: &str) -> &'static [&'static str] {
    match collection {
        ROUTES_COLLECTION | ALERTS_COLLECTION => &[DASHBOARD_PATH, LANDING_PATH],
        _ => &[DASHBOARD_PATH],
    }
}

pub struct MutationGateway<'a> {
    store: &'a DocumentStore,
    blobs: &'a BlobStore,
    pages: &'a PageCache,
    errors: &'a ErrorChannel,
    caller: Option<&'a Principal>,
}

impl<'a> MutationGateway<'a> {
    /// Creates a new instance of [`MutationGateway`] acting on behalf of `caller`.
    pub fn new(
        store: &'a DocumentStore,
        blobs: &'a BlobStore,
        pages: &'a PageCache,
        errors: &'a ErrorChannel,
        caller: Option<&'a Principal>,
    ) -> Self {
        Self {
            store,
            blobs,
            pages,
            errors,
            caller,
        }
    }

    /// Creates a route under the slug of its name and description.
    pub async fn create_route(&self, data: RouteData) -> ActionResult<String> {
        if let Err(reason) = validate_route(&data) {
            return ActionResult::err(reason);
        }

        let mut id = slugify(&format!("{} {}", data.name, data.description));
        if id.is_empty() {
            id = random_id(GENERATED_ID_LEN);
        }

        self.create(ROUTES_COLLECTION, id, &data).await
    }

    pub async fn update_route(&self, id: &str, patch: RoutePatch) -> ActionResult<RouteDto> {
        if let Err(reason) = validate_route_patch(&patch) {
            return ActionResult::err(reason);
        }

        self.update(ROUTES_COLLECTION, id, &patch).await
    }

    pub async fn delete_route(&self, id: &str) -> ActionResult<()> {
        self.delete(ROUTES_COLLECTION, id).await
    }

    pub async fn create_driver(&self, data: DriverData) -> ActionResult<String> {
        if let Err(reason) = require_text("nombre", &data.name) {
            return ActionResult::err(reason);
        }

        self.create(DRIVERS_COLLECTION, random_id(GENERATED_ID_LEN), &data)
            .await
    }

    pub async fn update_driver(&self, id: &str, patch: DriverPatch) -> ActionResult<DriverDto> {
        if let Some(name) = &patch.name {
            if let Err(reason) = require_text("nombre", name) {
                return ActionResult::err(reason);
            }
        }

        self.update(DRIVERS_COLLECTION, id, &patch).await
    }

    pub async fn delete_driver(&self, id: &str) -> ActionResult<()> {
        self.delete(DRIVERS_COLLECTION, id).await
    }

    pub async fn create_alert(&self, data: AlertData) -> ActionResult<String> {
        if let Err(reason) = require_text("titulo", &data.title) {
            return ActionResult::err(reason);
        }

        self.create(ALERTS_COLLECTION, random_id(GENERATED_ID_LEN), &data)
            .await
    }

    pub async fn update_alert(&self, id: &str, patch: AlertPatch) -> ActionResult<AlertDto> {
        if let Some(title) = &patch.title {
            if let Err(reason) = require_text("titulo", title) {
                return ActionResult::err(reason);
            }
        }

        self.update(ALERTS_COLLECTION, id, &patch).await
    }

    pub async fn delete_alert(&self, id: &str) -> ActionResult<()> {
        self.delete(ALERTS_COLLECTION, id).await
    }

    /// Stores an uploaded image and returns its public URL.
    ///
    /// Uploads are admin-only and served publicly; no cached page is invalidated since the
    /// URL only becomes visible once a route references it.
    pub async fn upload_file(&self, file: Option<FileUpload>, folder: &str) -> ActionResult<String> {
        let Some(file) = file.filter(|file| !file.bytes.is_empty()) else {
            return ActionResult::err(NO_FILE_PROVIDED);
        };

        let ref_path = format!("{}/{}/{}", UPLOADS_RESOURCE, folder, file.file_name);
        let resource = serde_json::json!({
            "fileName": file.file_name,
            "contentType": file.content_type,
            "size": file.bytes.len(),
        });

        self.run(Operation::Create, &ref_path, Some(resource), &[], async {
            self.store
                .rules()
                .check(self.caller, Operation::Create, UPLOADS_RESOURCE, &ref_path)?;

            let blob = self
                .blobs
                .put(BlobUpload {
                    folder: folder.to_string(),
                    file_name: file.file_name,
                    content_type: file.content_type,
                    bytes: file.bytes,
                    public: true,
                })
                .await?;

            Ok::<_, StoreError>(blob.url)
        })
        .await
    }

    async fn create<D: Serialize>(
        &self,
        collection: &str,
        id: String,
        data: &D,
    ) -> ActionResult<String> {
        let fields = match stamped_fields(data) {
            Ok(fields) => fields,
            Err(err) => return ActionResult::err(err.to_string()),
        };
        let ref_path = document_path(collection, &id);
        let resource = Value::Object(fields.clone());

        self.run(
            Operation::Create,
            &ref_path,
            Some(resource),
            affected_pages(collection),
            async {
                self.store.set(self.caller, collection, &id, fields).await?;

                Ok::<_, StoreError>(id.clone())
            },
        )
        .await
    }

    async fn update<P: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        patch: &P,
    ) -> ActionResult<T> {
        let fields = match stamped_fields(patch) {
            Ok(fields) => fields,
            Err(err) => return ActionResult::err(err.to_string()),
        };
        let ref_path = document_path(collection, id);
        let resource = Value::Object(fields.clone());

        self.run(
            Operation::Update,
            &ref_path,
            Some(resource),
            affected_pages(collection),
            async {
                let written = self.store.update(self.caller, collection, id, fields).await?;

                Ok::<_, StoreError>(written.decode::<T>()?)
            },
        )
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> ActionResult<()> {
        let ref_path = document_path(collection, id);

        self.run(
            Operation::Delete,
            &ref_path,
            None,
            affected_pages(collection),
            self.store.delete(self.caller, collection, id),
        )
        .await
    }

    /// Runs `action`, invalidating `pages` on success and normalizing any failure.
    async fn run<T, F>(
        &self,
        operation: Operation,
        ref_path: &str,
        resource: Option<Value>,
        pages: &[&str],
        action: F,
    ) -> ActionResult<T>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match action.await {
            Ok(data) => {
                for page in pages {
                    self.pages.invalidate(page);
                }

                ActionResult::ok(data)
            }
            Err(err) => {
                if err.is_permission_denied() {
                    self.errors.publish(&PermissionError::new(
                        err.to_string(),
                        ref_path,
                        operation,
                        resource,
                    ));
                }

                tracing::error!(%operation, ref_path, "Server action failed: {}", err);

                ActionResult::err(err.to_string())
            }
        }
    }
}

/// Serializes `data` and stamps it with the server-timestamp sentinel.
fn stamped_fields<D: Serialize>(data: &D) -> Result<Map<String, Value>, StoreError> {
    let mut fields = match serde_json::to_value(data)? {
        Value::Object(fields) => fields,
        other => {
            return Err(StoreError::InvalidArgument(format!(
                "Expected an object, got {}",
                other
            )))
        }
    };
    fields.insert(LAST_UPDATED_FIELD.to_string(), server_timestamp());

    Ok(fields)
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty.", field));
    }

    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<(), String> {
    if !(value > 0.0) {
        return Err(format!("{} must be greater than zero.", field));
    }

    Ok(())
}

fn validate_route(data: &RouteData) -> Result<(), String> {
    require_text("nombre", &data.name)?;
    require_positive("duracionMin", f64::from(data.duration_min))?;
    require_positive("tarifaCRC", data.fare_crc)
}

fn validate_route_patch(patch: &RoutePatch) -> Result<(), String> {
    if let Some(name) = &patch.name {
        require_text("nombre", name)?;
    }
    if let Some(duration_min) = patch.duration_min {
        require_positive("duracionMin", f64::from(duration_min))?;
    }
    if let Some(fare_crc) = patch.fare_crc {
        require_positive("tarifaCRC", fare_crc)?;
    }

    Ok(())
}
