//! # Item Updates
//!
//! Latest-value broadcast of the overview's item list. Holds the most
//! recent [`ItemsUpdate`], replays it to new subscribers and delivers
//! every subsequent update to all subscribers in subscription order.
//! A subscription lasts as long as the [`Subscription`] guard it returns.

use crate::overview::models::CollectionItem;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// How the presentation layer should apply an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeMode {
    /// Replace everything currently displayed
    Overwrite,
    /// Add to the end of what is displayed
    Append,
}

/// A batch of items plus how to apply them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsUpdate {
    pub mode: StateChangeMode,
    pub items: Vec<CollectionItem>,
}

impl ItemsUpdate {
    pub fn new(mode: StateChangeMode, items: Vec<CollectionItem>) -> Self {
        Self { mode, items }
    }
}

/// Type alias for item update handlers to reduce complexity
pub type ItemsUpdateHandler = Arc<dyn Fn(&ItemsUpdate) + Send + Sync>;

#[derive(Default)]
struct Slot {
    value: Option<ItemsUpdate>,
    handlers: Vec<(u64, ItemsUpdateHandler)>,
    next_id: u64,
}

/// Keeps a handler registered; dropping it unsubscribes
#[must_use = "dropping the subscription unsubscribes the handler"]
pub struct Subscription {
    slot: Weak<Mutex<Slot>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            slot.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Single-slot, multi-subscriber channel of [`ItemsUpdate`]
///
/// Handlers run synchronously on the publishing task. They may read
/// [`ItemUpdates::value`] but must not subscribe from inside a handler.
#[derive(Default)]
pub struct ItemUpdates {
    slot: Arc<Mutex<Slot>>,
    // Held while handlers run so replay and publish never interleave.
    delivery: Mutex<()>,
}

impl ItemUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent update, `None` until the first one is published
    pub fn value(&self) -> Option<ItemsUpdate> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }

    /// Register a handler; it immediately receives the current value, if any
    ///
    /// The handler stays registered until the returned guard is dropped.
    pub fn subscribe(
        &self,
        handler: impl Fn(&ItemsUpdate) + Send + Sync + 'static,
    ) -> Subscription {
        let _delivery = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        let handler: ItemsUpdateHandler = Arc::new(handler);

        let (id, current) = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            let id = slot.next_id;
            slot.next_id += 1;
            slot.handlers.push((id, Arc::clone(&handler)));
            (id, slot.value.clone())
        };

        if let Some(update) = current {
            handler(&update);
        }

        Subscription {
            slot: Arc::downgrade(&self.slot),
            id,
        }
    }

    /// Store `update` as the current value and deliver it to every handler
    pub fn publish(&self, update: ItemsUpdate) {
        let _delivery = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);

        let handlers = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.value = Some(update.clone());
            slot.handlers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect::<Vec<_>>()
        };

        tracing::trace!(
            "Publishing {:?} of {} items to {} subscribers",
            update.mode,
            update.items.len(),
            handlers.len()
        );
        for handler in &handlers {
            handler(&update);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .len()
    }
}
