use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::server::{
    events::{log::PermissionErrorLog, ErrorChannel},
    model::session::Principal,
    service::{
        cache::PageCache, identity::IdentityService, mutation::MutationGateway,
        session::SessionBridge,
    },
    store::{blob::BlobStore, AccessRules, DocumentStore},
};

/// Permission errors kept for the diagnostics route when not configured otherwise.
pub const DEFAULT_PERMISSION_ERROR_LOG_SIZE: usize = 50;
/// URL prefix uploaded files are served from when not configured otherwise.
pub const DEFAULT_UPLOAD_PUBLIC_URL: &str = "/uploads";

#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub identity: IdentityService,
    pub errors: ErrorChannel,
    pub pages: PageCache,
    pub blobs: BlobStore,
    pub permission_log: PermissionErrorLog,
    pub session: SessionBridge,
}

impl AppState {
    /// Assembles the application state and attaches the permission error log to the
    /// error channel.
    pub fn new(
        db: DatabaseConnection,
        identity: IdentityService,
        blobs: BlobStore,
        permission_log_size: usize,
    ) -> Self {
        let errors = ErrorChannel::new();
        let permission_log = PermissionErrorLog::new(permission_log_size);
        permission_log.attach(&errors);

        Self {
            store: DocumentStore::new(db, AccessRules::default()),
            identity,
            errors,
            pages: PageCache::new(),
            blobs,
            permission_log,
            session: SessionBridge::for_build(),
        }
    }

    /// Mutation gateway acting on behalf of `caller`.
    pub fn gateway<'a>(&'a self, caller: Option<&'a Principal>) -> MutationGateway<'a> {
        MutationGateway::new(&self.store, &self.blobs, &self.pages, &self.errors, caller)
    }
}

/// Builds state from a database, an identity token secret and an upload directory.
impl From<(DatabaseConnection, String, PathBuf)> for AppState {
    fn from((db, identity_secret, upload_dir): (DatabaseConnection, String, PathBuf)) -> Self {
        Self::new(
            db,
            IdentityService::new(identity_secret.as_bytes()),
            BlobStore::new(upload_dir, DEFAULT_UPLOAD_PUBLIC_URL),
            DEFAULT_PERMISSION_ERROR_LOG_SIZE,
        )
    }
}
