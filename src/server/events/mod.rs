//! Publish/subscribe channel for structured permission errors.
//!
//! The data layer publishes a [`PermissionError`] whenever the access rules deny an
//! operation; diagnostic surfaces subscribe without the data layer knowing about them. The
//! channel is an explicit value (held in `AppState`), so tests can build isolated instances.

pub mod log;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::server::model::permission::PermissionError;

/// Handle returned by [`ErrorChannel::subscribe`], used to unsubscribe again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&PermissionError) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Synchronous broadcast of permission errors to the currently registered listeners.
///
/// Events published while nobody listens are dropped. Cloning yields another handle to the
/// same channel.
#[derive(Clone, Default)]
pub struct ErrorChannel {
    registry: Arc<Mutex<Registry>>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `listener`; it receives every event published from now on.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&PermissionError) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));

        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.registry();
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);

        registry.listeners.len() != before
    }

    /// Delivers `event` to every listener in registration order and returns how many
    /// listeners received it.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or unsubscribe
    /// while being called.
    pub fn publish(&self, event: &PermissionError) -> usize {
        let listeners: Vec<Listener> = self
            .registry()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in &listeners {
            listener(event);
        }

        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.registry().listeners.len()
    }
}
