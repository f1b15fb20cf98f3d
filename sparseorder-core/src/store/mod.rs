//! External collaborators of the ordering core
//!
//! The core never touches persistence or presentation directly. It reads and
//! writes through [`OrderStore`] and asks a [`ListRefresher`] to re-render
//! lists after a successful move. [`MemoryStore`] is an in-process store used
//! by tests and the command-line driver.

mod memory;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{CollectionId, ItemId, Position, SiblingEntry};

pub use memory::{Layout, MemoryStore};

/// A move to persist: `item` leaves `from` and lands in `to` at `position`
///
/// For same-collection moves `from == to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Item being moved
    pub item: ItemId,
    /// Collection the item currently belongs to
    pub from: CollectionId,
    /// Destination collection
    pub to: CollectionId,
    /// Position allocated in the destination
    pub position: Position,
}

impl MoveRecord {
    /// Returns true if the item stays in the same collection
    #[must_use]
    pub fn is_within_collection(&self) -> bool {
        self.from == self.to
    }
}

/// A copy to persist: `item` gains an entry in `to` at `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRecord {
    /// Item being copied
    pub item: ItemId,
    /// Destination collection
    pub to: CollectionId,
    /// Position allocated in the destination
    pub position: Position,
}

/// A removal to persist: `item` leaves `from`
///
/// Positions of the remaining siblings are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveRecord {
    /// Item being removed
    pub item: ItemId,
    /// Collection the item is removed from
    pub from: CollectionId,
}

/// Source of truth for sibling order
///
/// Implementations are the only arbiter between concurrent writers; the core
/// performs no locking of its own.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Reads the siblings of a collection in ascending position order
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CollectionNotFound`](crate::error::StoreError)
    /// for an unknown collection. An empty collection is an empty list.
    async fn read_snapshot(&self, collection: &CollectionId) -> StoreResult<Vec<SiblingEntry>>;

    /// Re-spaces all siblings at multiples of the step, keeping their order
    ///
    /// Must be idempotent and must never reorder items.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is unknown or the write fails.
    async fn renumber(&self, collection: &CollectionId) -> StoreResult<()>;

    /// Commits a move
    ///
    /// # Errors
    ///
    /// Returns an error if the item or collections are unknown or the write fails.
    async fn persist_move(&self, record: &MoveRecord) -> StoreResult<()>;

    /// Commits a copy
    ///
    /// # Errors
    ///
    /// Returns an error if the destination is unknown, already holds the item,
    /// or the write fails.
    async fn persist_copy(&self, record: &CopyRecord) -> StoreResult<()>;

    /// Commits a removal
    ///
    /// # Errors
    ///
    /// Returns an error if the collection or the item is unknown or the write
    /// fails.
    async fn persist_remove(&self, record: &RemoveRecord) -> StoreResult<()>;

    /// Short identifier used in log fields
    fn backend_id(&self) -> &'static str;
}

/// Presentation hook asked to re-render a list after a successful change
///
/// Fire-and-forget: the core does not wait on or inspect the outcome.
pub trait ListRefresher: Send + Sync {
    /// Requests a reload of the collection's rendered list
    fn reload_list(&self, collection: &CollectionId);
}

/// Refresher that ignores all requests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRefresher;

impl ListRefresher for NoopRefresher {
    fn reload_list(&self, _collection: &CollectionId) {}
}

/// Refresher that remembers every reload request in order
#[derive(Debug, Default)]
pub struct RecordingRefresher {
    reloads: Mutex<Vec<CollectionId>>,
}

impl RecordingRefresher {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collections reloaded so far, oldest first
    #[must_use]
    pub fn reloads(&self) -> Vec<CollectionId> {
        self.reloads
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Forgets all recorded requests
    pub fn clear(&self) {
        if let Ok(mut guard) = self.reloads.lock() {
            guard.clear();
        }
    }
}

impl ListRefresher for RecordingRefresher {
    fn reload_list(&self, collection: &CollectionId) {
        if let Ok(mut guard) = self.reloads.lock() {
            guard.push(*collection);
        }
    }
}
