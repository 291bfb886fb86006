//! Live queries backed by the store's change feed.

use dioxus_logger::tracing;
use tokio::sync::broadcast::error::RecvError;

use crate::server::{
    model::{query::CollectionQuery, session::Principal},
    store::DocumentStore,
    sync::{ListenerHandle, SnapshotSink, SnapshotSource},
};

impl SnapshotSource for DocumentStore {
    /// Spawns a task that delivers the initial result set and re-runs the query after every
    /// committed write to the queried collection.
    ///
    /// The task stops as soon as the handle is detached, when the sink discards a snapshot
    /// or after a failed snapshot. Must be called within a tokio runtime.
    fn listen(
        &self,
        query: CollectionQuery,
        caller: Option<Principal>,
        sink: SnapshotSink,
    ) -> ListenerHandle {
        let handle = ListenerHandle::new();
        let task_handle = handle.clone();
        let store = self.clone();
        // Subscribe before the first read so no write between the two is missed.
        let mut changes = self.changes();

        tokio::spawn(async move {
            'listen: loop {
                if task_handle.is_detached() {
                    break;
                }

                let snapshot = store.list(caller.as_ref(), &query).await;
                let failed = snapshot.is_err();

                if task_handle.is_detached() || !sink.deliver(snapshot) || failed {
                    break;
                }

                loop {
                    let received = tokio::select! {
                        _ = task_handle.detached() => None,
                        received = changes.recv() => Some(received),
                    };

                    match received {
                        None => break 'listen,
                        Some(Ok(event)) if event.collection == query.collection => break,
                        Some(Ok(_)) => continue,
                        Some(Err(RecvError::Lagged(skipped))) => {
                            tracing::debug!(
                                collection = %query.collection,
                                skipped,
                                "Live query lagged behind the change feed, resyncing"
                            );
                            break;
                        }
                        Some(Err(RecvError::Closed)) => break 'listen,
                    }
                }
            }

            tracing::trace!(collection = %query.collection, "Live query stopped");
        });

        handle
    }
}
