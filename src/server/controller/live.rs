use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Sse,
    },
};
use futures::stream;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::{
    model::{
        api::ErrorDto,
        transit::{ALERTS_COLLECTION, DRIVERS_COLLECTION, ROUTES_COLLECTION},
    },
    server::{
        controller::util::caller::Caller,
        error::{store::StoreError, Error},
        model::app::AppState,
        service::view::query_for,
        sync::{CollectionState, CollectionSync, SyncPhase},
    },
};

pub static LIVE_TAG: &str = "live";

/// Name of the server-sent event carrying a collection state.
pub const SNAPSHOT_EVENT: &str = "snapshot";

const LIVE_COLLECTIONS: [&str; 3] = [ROUTES_COLLECTION, ALERTS_COLLECTION, DRIVERS_COLLECTION];

/// `(items, loading, error)` as sent to the browser.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LiveStateDto {
    #[schema(value_type = Option<Vec<Object>>)]
    pub items: Option<Vec<Value>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<&CollectionState<Value>> for LiveStateDto {
    fn from(state: &CollectionState<Value>) -> Self {
        Self {
            items: state.items.clone(),
            loading: state.loading,
            error: state.error.as_ref().map(|err| err.to_string()),
        }
    }
}

struct LiveStream {
    // Dropping the hook detaches its listener.
    _sync: CollectionSync<Value>,
    rx: watch::Receiver<CollectionState<Value>>,
    finished: bool,
}

/// Subscribe to a collection as a stream of server-sent events
///
/// Every change to the collection sends a `snapshot` event with the complete, ordered list.
/// A failed query (e.g. a denied drivers subscription) sends a final snapshot carrying the
/// error and ends the stream.
#[utoipa::path(
    get,
    path = "/api/live/{collection}",
    tag = LIVE_TAG,
    params(("collection" = String, Path, description = "One of routes, alerts or drivers")),
    responses(
        (status = 200, description = "Stream of collection snapshots", body = LiveStateDto, content_type = "text/event-stream"),
        (status = 404, description = "Unknown collection", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(collection): Path<String>,
) -> Result<impl IntoResponse, Error> {
    if !LIVE_COLLECTIONS.contains(&collection.as_str()) {
        return Err(StoreError::NotFound(collection).into());
    }

    let sync: CollectionSync<Value> =
        CollectionSync::new(Arc::new(state.store.clone()), caller, state.errors.clone());
    let rx = sync.watch();
    sync.bind(Some(query_for(&collection)), None);

    let live = LiveStream {
        _sync: sync,
        rx,
        finished: false,
    };

    let events = stream::unfold(live, |mut live| async move {
        if live.finished {
            return None;
        }

        loop {
            live.rx.changed().await.ok()?;
            let state = live.rx.borrow_and_update().clone();
            if state.phase == SyncPhase::Seeded && state.loading {
                continue;
            }

            live.finished = state.error.is_some();
            let event = Event::default()
                .event(SNAPSHOT_EVENT)
                .json_data(LiveStateDto::from(&state));

            return Some((event, live));
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
