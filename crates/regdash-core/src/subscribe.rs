//! Typed subscriber registries for session-state change notification.
//!
//! Delivery is synchronous and in registration order: every callback runs
//! before the mutating call that triggered it returns. Registries are small
//! and bounded by the number of live view components, so there is no
//! backpressure handling.

use std::sync::{Mutex, PoisonError};

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
///
/// Closures are not comparable, so removal is by handle rather than by
/// callback identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Table<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A registry of change callbacks for one piece of session state.
///
/// Callbacks must not call back into the registry they are registered on;
/// the notifying thread holds the registry lock while delivering.
pub struct Listeners<T> {
    table: Mutex<Table<T>>,
}

impl<T> Listeners<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register a callback; it will be invoked on every future change.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        let mut table = self.lock();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, Box::new(callback)));
        SubscriberId(id)
    }

    /// Register a callback and immediately replay the current value to it
    /// (latest-value semantics for new subscribers).
    pub fn subscribe_with_replay(
        &self,
        callback: impl Fn(&T) + Send + Sync + 'static,
        current: &T,
    ) -> SubscriberId {
        callback(current);
        self.subscribe(callback)
    }

    /// Remove a previously registered callback. Returns whether it was
    /// still registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut table = self.lock();
        let before = table.entries.len();
        table.entries.retain(|(entry_id, _)| *entry_id != id.0);
        table.entries.len() != before
    }

    /// Invoke every registered callback with `value`, in registration order.
    pub fn notify(&self, value: &T) {
        let table = self.lock();
        for (_, callback) in &table.entries {
            callback(value);
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table<T>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}
