//! In-memory order store
//!
//! Keeps every collection as a position-sorted vector behind a
//! `tokio::sync::RwLock`. Writers are serialized by the lock, so the last
//! write wins.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{CopyRecord, MoveRecord, OrderStore, RemoveRecord};
use crate::error::{StoreError, StoreResult};
use crate::models::{CollectionId, DEFAULT_STEP, ItemId, Position, SiblingEntry};

/// Serializable contents of a [`MemoryStore`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Siblings of every known collection
    #[serde(default)]
    pub collections: BTreeMap<CollectionId, Vec<SiblingEntry>>,
}

impl Layout {
    /// A layout holding only an empty root collection
    #[must_use]
    pub fn with_root() -> Self {
        let mut collections = BTreeMap::new();
        collections.insert(CollectionId::Root, Vec::new());
        Self { collections }
    }
}

/// Order store kept entirely in memory
#[derive(Debug)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<CollectionId, Vec<SiblingEntry>>>,
    step: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a store with an empty root collection and the default step
    #[must_use]
    pub fn new() -> Self {
        Self::with_step(DEFAULT_STEP)
    }

    /// Creates a store with an empty root collection renumbering at `step`
    #[must_use]
    pub fn with_step(step: u64) -> Self {
        Self::from_layout(Layout::with_root(), step)
    }

    /// Restores a store from a layout
    ///
    /// Entries are sorted by position; duplicates are kept as-is so that
    /// snapshot validation can report them.
    #[must_use]
    pub fn from_layout(layout: Layout, step: u64) -> Self {
        let mut collections = layout.collections;
        for entries in collections.values_mut() {
            entries.sort_by_key(|e| e.position);
        }
        Self {
            collections: RwLock::new(collections),
            step,
        }
    }

    /// Returns a copy of the current contents
    pub async fn layout(&self) -> Layout {
        Layout {
            collections: self.collections.read().await.clone(),
        }
    }

    /// Registers an empty collection
    ///
    /// Returns `false` if the collection already existed.
    pub async fn create_collection(&self, collection: CollectionId) -> bool {
        let mut collections = self.collections.write().await;
        if collections.contains_key(&collection) {
            return false;
        }
        collections.insert(collection, Vec::new());
        tracing::debug!(collection = %collection, "Collection created");
        true
    }

    /// Inserts an item at an explicit position
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is unknown, already contains the
    /// item, or the position is taken.
    pub async fn insert(
        &self,
        collection: CollectionId,
        item: ItemId,
        position: Position,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(&collection)
            .ok_or(StoreError::CollectionNotFound(collection))?;
        check_vacant(entries, collection, item, position)?;
        insert_sorted(entries, SiblingEntry::new(item, position));
        Ok(())
    }
}

fn insert_sorted(entries: &mut Vec<SiblingEntry>, entry: SiblingEntry) {
    let index = entries.partition_point(|e| e.position < entry.position);
    entries.insert(index, entry);
}

fn check_vacant(
    entries: &[SiblingEntry],
    collection: CollectionId,
    item: ItemId,
    position: Position,
) -> StoreResult<()> {
    if entries.iter().any(|e| e.id == item) {
        return Err(StoreError::DuplicateItem { item, collection });
    }
    if entries.iter().any(|e| e.position == position) {
        return Err(StoreError::PositionTaken {
            position: position.get(),
            collection,
        });
    }
    Ok(())
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn read_snapshot(&self, collection: &CollectionId) -> StoreResult<Vec<SiblingEntry>> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .ok_or(StoreError::CollectionNotFound(*collection))
    }

    async fn renumber(&self, collection: &CollectionId) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(collection)
            .ok_or(StoreError::CollectionNotFound(*collection))?;

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.position = Position::nth(index, self.step).ok_or_else(|| {
                StoreError::Unavailable(format!(
                    "cannot renumber item {index} of {collection} with step {}",
                    self.step
                ))
            })?;
        }

        tracing::debug!(
            collection = %collection,
            item_count = entries.len(),
            step = self.step,
            "Collection renumbered"
        );
        Ok(())
    }

    async fn persist_move(&self, record: &MoveRecord) -> StoreResult<()> {
        let mut collections = self.collections.write().await;

        let source = collections
            .get(&record.from)
            .ok_or(StoreError::CollectionNotFound(record.from))?;
        if !source.iter().any(|e| e.id == record.item) {
            return Err(StoreError::ItemNotFound {
                item: record.item,
                collection: record.from,
            });
        }

        let destination = collections
            .get(&record.to)
            .ok_or(StoreError::CollectionNotFound(record.to))?;
        if !record.is_within_collection() && destination.iter().any(|e| e.id == record.item) {
            return Err(StoreError::DuplicateItem {
                item: record.item,
                collection: record.to,
            });
        }
        // The item's own old position is vacated by the move
        let others: Vec<SiblingEntry> = destination
            .iter()
            .filter(|e| e.id != record.item)
            .copied()
            .collect();
        check_vacant(&others, record.to, record.item, record.position)?;

        if let Some(source) = collections.get_mut(&record.from) {
            source.retain(|e| e.id != record.item);
        }
        if let Some(destination) = collections.get_mut(&record.to) {
            insert_sorted(destination, SiblingEntry::new(record.item, record.position));
        }

        tracing::debug!(
            item = %record.item,
            from = %record.from,
            to = %record.to,
            position = %record.position,
            "Move persisted"
        );
        Ok(())
    }

    async fn persist_copy(&self, record: &CopyRecord) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let destination = collections
            .get_mut(&record.to)
            .ok_or(StoreError::CollectionNotFound(record.to))?;
        check_vacant(destination, record.to, record.item, record.position)?;
        insert_sorted(destination, SiblingEntry::new(record.item, record.position));

        tracing::debug!(
            item = %record.item,
            to = %record.to,
            position = %record.position,
            "Copy persisted"
        );
        Ok(())
    }

    async fn persist_remove(&self, record: &RemoveRecord) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(&record.from)
            .ok_or(StoreError::CollectionNotFound(record.from))?;
        let index = entries
            .iter()
            .position(|e| e.id == record.item)
            .ok_or(StoreError::ItemNotFound {
                item: record.item,
                collection: record.from,
            })?;
        let removed = entries.remove(index);

        tracing::debug!(
            item = %record.item,
            from = %record.from,
            position = %removed.position,
            "Removal persisted"
        );
        Ok(())
    }

    fn backend_id(&self) -> &'static str {
        "memory"
    }
}
