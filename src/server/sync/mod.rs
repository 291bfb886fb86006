//! Collection synchronization: a state slot bound to a live query.
//!
//! [`CollectionSync`] is the server-side counterpart of a UI data hook. It exposes
//! `(items, loading, error)` for one collection query and keeps it current from a
//! [`SnapshotSource`]. The slot moves through two phases:
//!
//! - **Seeded**: an optional pre-fetched list is shown while the first live snapshot is
//!   pending. `loading` is `true` only when no seed was given.
//! - **Live**: every snapshot replaces the items wholesale. Live always wins over the seed.
//!
//! At most one listener is active per instance. Rebinding detaches the previous listener and
//! bumps a generation counter; snapshots carrying an older generation are discarded, so a
//! superseded query can never overwrite the state of its successor.

pub mod source;


use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use dioxus_logger::tracing;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::server::{
    error::store::StoreError,
    events::ErrorChannel,
    model::{
        permission::{Operation, PermissionError},
        query::CollectionQuery,
        session::Principal,
    },
    store::StoredDocument,
};

pub use source::{ListenerHandle, Snapshot, SnapshotSink, SnapshotSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncPhase {
    /// Not bound to a query.
    #[default]
    Idle,
    /// Showing the seed list while waiting for the first live snapshot.
    Seeded,
    /// Showing the most recent live snapshot.
    Live,
}

/// Observable output of a [`CollectionSync`].
#[derive(Clone, Debug)]
pub struct CollectionState<T> {
    pub items: Option<Vec<T>>,
    pub loading: bool,
    /// Last failure; previous items stay in place when this is set.
    pub error: Option<Arc<StoreError>>,
    pub phase: SyncPhase,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: None,
            loading: false,
            error: None,
            phase: SyncPhase::Idle,
        }
    }
}

#[derive(Default)]
struct Slot {
    generation: u64,
    handle: Option<ListenerHandle>,
}

struct SyncInner<T> {
    slot: Mutex<Slot>,
    state: watch::Sender<CollectionState<T>>,
}

impl<T> SyncInner<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.slot().generation == generation
    }

    fn apply(
        &self,
        generation: u64,
        ref_path: &str,
        errors: &ErrorChannel,
        snapshot: Snapshot,
    ) -> bool {
        match snapshot {
            Ok(documents) => {
                let items = decode_documents::<T>(&documents);

                let slot = self.slot();
                if slot.generation != generation {
                    tracing::trace!(ref_path, generation, "Discarding superseded snapshot");
                    return false;
                }

                self.state.send_modify(|state| {
                    state.items = Some(items);
                    state.loading = false;
                    state.error = None;
                    state.phase = SyncPhase::Live;
                });

                true
            }
            Err(err) => {
                if !self.is_current(generation) {
                    tracing::trace!(ref_path, generation, "Discarding superseded failure");
                    return false;
                }

                // Listeners run without the slot lock held so they may rebind this hook.
                if err.is_permission_denied() {
                    errors.publish(&PermissionError::new(
                        err.to_string(),
                        ref_path,
                        Operation::List,
                        None,
                    ));
                }

                let slot = self.slot();
                if slot.generation != generation {
                    return false;
                }

                tracing::debug!(ref_path, "Live query failed: {}", err);

                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(Arc::new(err));
                });

                true
            }
        }
    }
}

/// Decodes normalized documents, skipping (and logging) any that do not fit `T`.
pub fn decode_documents<T: DeserializeOwned>(documents: &[StoredDocument]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match document.decode::<T>() {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(id = %document.id, "Skipping malformed document: {}", err);
                None
            }
        })
        .collect()
}

/// A state slot kept in sync with one live collection query.
pub struct CollectionSync<T> {
    source: Arc<dyn SnapshotSource>,
    caller: Option<Principal>,
    errors: ErrorChannel,
    inner: Arc<SyncInner<T>>,
}

impl<T> CollectionSync<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates an unbound hook.
    ///
    /// # Arguments
    /// - `source` - Producer of live snapshots, usually the document store
    /// - `caller` - Principal the query is evaluated for; `None` for anonymous visitors
    /// - `errors` - Channel that receives permission errors raised by the query
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        caller: Option<Principal>,
        errors: ErrorChannel,
    ) -> Self {
        Self {
            source,
            caller,
            errors,
            inner: Arc::new(SyncInner {
                slot: Mutex::new(Slot::default()),
                state: watch::Sender::new(CollectionState::default()),
            }),
        }
    }

    /// Binds the hook to `query`, replacing any previous binding.
    ///
    /// A `None` query resolves immediately to the seed (or an empty list) with
    /// `loading = false` and opens no listener.
    pub fn bind(&self, query: Option<CollectionQuery>, initial: Option<Vec<T>>) {
        let Some(query) = query else {
            let _ = self.supersede();
            self.inner.state.send_replace(CollectionState {
                items: Some(initial.unwrap_or_default()),
                loading: false,
                error: None,
                phase: SyncPhase::Idle,
            });
            return;
        };

        let generation = {
            let generation = self.supersede();
            let loading = initial.is_none();
            self.inner.state.send_replace(CollectionState {
                items: initial,
                loading,
                error: None,
                phase: SyncPhase::Seeded,
            });
            generation
        };

        let sink = self.sink_for(generation, query.path().to_string());
        let handle = self.source.listen(query, self.caller.clone(), sink);

        let mut slot = self.inner.slot();
        if slot.generation == generation {
            slot.handle = Some(handle);
        } else {
            handle.detach();
        }
    }

    /// Detaches the current listener. Snapshots still in flight are ignored.
    pub fn unbind(&self) {
        let _ = self.supersede();
    }

    /// Current `(items, loading, error)` value.
    pub fn state(&self) -> CollectionState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn watch(&self) -> watch::Receiver<CollectionState<T>> {
        self.inner.state.subscribe()
    }

    pub fn is_listening(&self) -> bool {
        self.inner.slot().handle.is_some()
    }

    /// Detaches the active listener and returns the next generation.
    fn supersede(&self) -> u64 {
        let mut slot = self.inner.slot();
        if let Some(handle) = slot.handle.take() {
            handle.detach();
        }
        slot.generation += 1;

        slot.generation
    }

    fn sink_for(&self, generation: u64, ref_path: String) -> SnapshotSink {
        let inner: Weak<SyncInner<T>> = Arc::downgrade(&self.inner);
        let errors = self.errors.clone();

        SnapshotSink::new(move |snapshot| match inner.upgrade() {
            Some(inner) => inner.apply(generation, &ref_path, &errors, snapshot),
            None => false,
        })
    }
}

impl<T> Drop for CollectionSync<T> {
    fn drop(&mut self) {
        let mut slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.handle.take() {
            handle.detach();
        }
        slot.generation += 1;
    }
}
