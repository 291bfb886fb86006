//! The seam between live queries and whatever produces their snapshots.

use std::sync::Arc;

use tokio::sync::watch;

use crate::server::{
    error::store::StoreError,
    model::{query::CollectionQuery, session::Principal},
    store::StoredDocument,
};

/// One delivery from a live query: the complete ordered result set, or the failure that
/// ended the subscription.
pub type Snapshot = Result<Vec<StoredDocument>, StoreError>;

/// Callback end of a live query.
#[derive(Clone)]
pub struct SnapshotSink {
    deliver: Arc<dyn Fn(Snapshot) -> bool + Send + Sync>,
}

impl SnapshotSink {
    pub fn new<F>(deliver: F) -> Self
    where
        F: Fn(Snapshot) -> bool + Send + Sync + 'static,
    {
        Self {
            deliver: Arc::new(deliver),
        }
    }

    /// Hands a snapshot to the receiving side.
    ///
    /// Returns `false` when the receiver discarded it because it no longer follows this
    /// listener; sources may stop producing at that point.
    pub fn deliver(&self, snapshot: Snapshot) -> bool {
        (self.deliver)(snapshot)
    }
}

/// Detach flag shared between a listener and its source.
///
/// Detaching does not abort in-flight reads. Sources either check the flag before producing
/// the next snapshot or wait on [`ListenerHandle::detached`] while idle.
#[derive(Clone, Debug)]
pub struct ListenerHandle {
    detached: Arc<watch::Sender<bool>>,
}

impl ListenerHandle {
    pub fn new() -> Self {
        Self {
            detached: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn detach(&self) {
        self.detached.send_replace(true);
    }

    pub fn is_detached(&self) -> bool {
        *self.detached.borrow()
    }

    /// Resolves once the handle has been detached, immediately if it already is.
    pub async fn detached(&self) {
        let mut rx = self.detached.subscribe();

        // The sender lives as long as `self`, so this only returns once the flag is set.
        let _ = rx.wait_for(|detached| *detached).await;
    }
}

impl Default for ListenerHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer of live query snapshots.
pub trait SnapshotSource: Send + Sync {
    /// Starts delivering snapshots of `query`, evaluated on behalf of `caller`, to `sink`
    /// until the returned handle is detached or a failure is delivered.
    fn listen(
        &self,
        query: CollectionQuery,
        caller: Option<Principal>,
        sink: SnapshotSink,
    ) -> ListenerHandle;
}
