//! Cached view payloads keyed by page path.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use dioxus_logger::tracing;
use serde_json::Value;

/// Public landing page showing routes and alerts.
pub const LANDING_PATH: &str = "/";
/// Admin dashboard showing routes, alerts and drivers.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

#[derive(Default)]
struct Pages {
    /// Bumped on every invalidation; renders started before a bump are not stored.
    revision: u64,
    entries: HashMap<String, Value>,
}

/// Per-path cache of rendered view payloads.
///
/// Keys are page paths, optionally followed by a `?` and a variant (e.g. the dashboard is
/// cached per access level). Invalidating a path drops every variant of it.
#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<Mutex<Pages>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn pages(&self) -> MutexGuard<'_, Pages> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.pages().entries.get(key).cloned()
    }

    pub fn put(&self, key: impl Into<String>, payload: Value) {
        self.pages().entries.insert(key.into(), payload);
    }

    /// Drops the cached payload of `path` and all of its variants.
    pub fn invalidate(&self, path: &str) {
        let variant_prefix = format!("{}?", path);
        let mut pages = self.pages();
        pages.revision += 1;
        pages
            .entries
            .retain(|key, _| key != path && !key.starts_with(&variant_prefix));

        tracing::debug!(path, "Invalidated cached page");
    }

    /// Returns the cached payload for `key` or renders, stores and returns a fresh one.
    ///
    /// A render that overlaps an invalidation is returned but not cached.
    pub async fn get_or_render<F, Fut, E>(&self, key: &str, render: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        let revision = {
            let pages = self.pages();
            if let Some(payload) = pages.entries.get(key) {
                return Ok(payload.clone());
            }
            pages.revision
        };

        let payload = render().await?;

        let mut pages = self.pages();
        if pages.revision == revision {
            pages.entries.insert(key.to_string(), payload.clone());
        }

        Ok(payload)
    }
}
