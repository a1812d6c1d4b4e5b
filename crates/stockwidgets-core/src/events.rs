//! Page-scoped notification bus.
//!
//! Widgets subscribe when mounted and hold the returned [`Subscription`];
//! dropping it unregisters the listener. Dispatch is synchronous and follows
//! subscription order, so every listener has run when `publish` returns.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Name of the cross-widget symbol hand-off notification.
pub const SYMBOL_SELECTED: &str = "symbol-selected";

/// Keyboard key as seen by page-wide key listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

/// Event broadcast to every listener on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SymbolSelected(String),
    KeyDown(Key),
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SymbolSelected(_) => SYMBOL_SELECTED,
            Self::KeyDown(_) => "keydown",
        }
    }
}

type Listener = Arc<dyn Fn(&PageEvent) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    listeners: Mutex<BTreeMap<u64, Listener>>,
}

impl BusInner {
    fn remove(&self, id: u64) {
        self.listeners
            .lock()
            .expect("listener registry should not be poisoned")
            .remove(&id);
    }
}

/// Shared handle to one page's listeners. Clones share the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PageEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .expect("listener registry should not be poisoned")
            .insert(id, Arc::new(listener));

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to every current listener and returns how many ran.
    pub fn publish(&self, event: &PageEvent) -> usize {
        // Snapshot so listeners may subscribe or unsubscribe while being notified.
        let listeners = self
            .inner
            .listeners
            .lock()
            .expect("listener registry should not be poisoned")
            .values()
            .cloned()
            .collect::<Vec<_>>();

        tracing::trace!(event = event.name(), listeners = listeners.len(), "publishing page event");
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .expect("listener registry should not be poisoned")
            .len()
    }
}

impl Debug for EventBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Registration guard; the listener stays active until this is dropped.
#[must_use = "dropping a Subscription unregisters its listener immediately"]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.id);
        }
    }
}
