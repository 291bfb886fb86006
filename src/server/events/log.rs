//! Bounded in-memory log of recent permission errors.
//!
//! Attached to the [`ErrorChannel`] at startup, this is the server-side diagnostic surface:
//! every event is logged and the most recent ones are kept for the admin diagnostics route.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use dioxus_logger::tracing;

use crate::server::{
    events::{ErrorChannel, ListenerId},
    model::permission::PermissionError,
};

#[derive(Clone)]
pub struct PermissionErrorLog {
    entries: Arc<Mutex<VecDeque<PermissionError>>>,
    capacity: usize,
}

impl PermissionErrorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Subscribes this log to `channel`.
    pub fn attach(&self, channel: &ErrorChannel) -> ListenerId {
        let log = self.clone();

        channel.subscribe(move |event| {
            tracing::warn!(
                operation = %event.operation,
                ref_path = %event.ref_path,
                "Permission denied: {}",
                event.message
            );

            log.record(event.clone());
        })
    }

    pub fn record(&self, event: PermissionError) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// Recorded events, newest first.
    pub fn recent(&self) -> Vec<PermissionError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .cloned()
            .collect()
    }
}
