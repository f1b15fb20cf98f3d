//! Snapshot reading and read-only projections over the store.

use std::fmt;
use std::sync::Arc;

use tracing::Instrument;

use crate::error::{OrderError, OrderResult, StoreError};
use crate::models::{Anchor, CollectionId, ItemId, Position, Side, Snapshot};
use crate::order::allocator::{Allocation, allocate};
use crate::store::OrderStore;
use crate::tracing::span_names;

/// A collection items can be filed into, with where a new item would go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderSummary {
    /// The folder's collection, or [`CollectionId::Root`]
    pub collection: CollectionId,
    /// Position of the folder within the root collection; `None` for the root
    pub position: Option<Position>,
    /// Position an item appended to the collection would receive
    pub next_position: Position,
}

/// Reads validated snapshots from an [`OrderStore`]
///
/// Every call goes to the store; nothing is cached, so a read issued after a
/// completed renumber observes the renumbered positions.
#[derive(Clone)]
pub struct SnapshotReader {
    store: Arc<dyn OrderStore>,
    step: u64,
}

impl fmt::Debug for SnapshotReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotReader")
            .field("backend", &self.store.backend_id())
            .field("step", &self.step)
            .finish()
    }
}

impl SnapshotReader {
    /// Creates a reader over `store`; `step` is used for append projections
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, step: u64) -> Self {
        Self { store, step }
    }

    /// Reads the siblings of `collection` in ascending position order
    ///
    /// # Errors
    ///
    /// - [`OrderError::CollectionNotFound`] if the store does not know the collection
    /// - [`OrderError::CorruptSnapshot`] if positions are not strictly increasing
    /// - [`OrderError::Store`] for any other store failure
    pub async fn read(&self, collection: &CollectionId) -> OrderResult<Snapshot> {
        let span =
            crate::trace_operation_debug!(span_names::SNAPSHOT_READ, collection = %collection);
        let entries = self
            .store
            .read_snapshot(collection)
            .instrument(span)
            .await
            .map_err(|e| match e {
                StoreError::CollectionNotFound(id) => OrderError::CollectionNotFound(id),
                other => OrderError::Store(other),
            })?;

        tracing::trace!(
            collection = %collection,
            item_count = entries.len(),
            "Snapshot read"
        );
        Snapshot::new(*collection, entries)
    }

    /// Reads a snapshot leaving out `exclude`
    ///
    /// # Errors
    ///
    /// Same as [`SnapshotReader::read`].
    pub async fn read_excluding(
        &self,
        collection: &CollectionId,
        exclude: Option<ItemId>,
    ) -> OrderResult<Snapshot> {
        let snapshot = self.read(collection).await?;
        Ok(match exclude {
            Some(item) => snapshot.without(item),
            None => snapshot,
        })
    }

    /// Position for appending to the end of `collection`
    ///
    /// # Errors
    ///
    /// Same as [`SnapshotReader::read`], plus
    /// [`OrderError::PositionSpaceExhausted`] if the last position leaves no
    /// room for another step.
    pub async fn next_position(&self, collection: &CollectionId) -> OrderResult<Position> {
        let snapshot = self.read(collection).await?;
        match allocate(&snapshot, Anchor::End, Side::After, self.step)? {
            Allocation::Free(position) => Ok(position),
            Allocation::Exhausted(_) => Err(OrderError::PositionSpaceExhausted {
                collection: *collection,
            }),
        }
    }

    /// Summaries of every folder in the root collection, in display order
    ///
    /// Root entries without a collection of their own are plain items and
    /// are skipped. With `include_root` the root collection itself comes
    /// first. `exclude` leaves one collection out, e.g. the one an item is
    /// being moved away from.
    ///
    /// # Errors
    ///
    /// Fails if the root or any listed folder collection cannot be read.
    pub async fn folder_overview(
        &self,
        exclude: Option<CollectionId>,
        include_root: bool,
    ) -> OrderResult<Vec<FolderSummary>> {
        let root = self.read(&CollectionId::Root).await?;
        let mut folders = Vec::with_capacity(root.len() + 1);

        if include_root && exclude != Some(CollectionId::Root) {
            let next_position = self.next_position(&CollectionId::Root).await?;
            folders.push(FolderSummary {
                collection: CollectionId::Root,
                position: None,
                next_position,
            });
        }

        for entry in root.entries() {
            let collection = CollectionId::Folder(entry.id);
            if exclude == Some(collection) {
                continue;
            }
            match self.next_position(&collection).await {
                Ok(next_position) => folders.push(FolderSummary {
                    collection,
                    position: Some(entry.position),
                    next_position,
                }),
                Err(OrderError::CollectionNotFound(_)) => {
                    tracing::trace!(item = %entry.id, "Root item is not a folder");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(folders)
    }
}
