//! Move execution: resolve, persist, refresh
//!
//! The only mutating step besides a possible renumber is the final persist
//! call, so abandoning a move after resolution leaves the store unchanged.

use std::fmt;
use std::sync::Arc;

use tracing::Instrument;

use crate::drag_drop::DropTarget;
use crate::error::{OrderError, OrderResult};
use crate::models::{Anchor, CollectionId, ItemId, Position, Side};
use crate::order::coordinator::PositionResolver;
use crate::store::{CopyRecord, ListRefresher, MoveRecord, OrderStore, RemoveRecord};
use crate::tracing::span_names;

/// Entry point for UI reorder actions
#[derive(Clone)]
pub struct MoveExecutor {
    resolver: PositionResolver,
    store: Arc<dyn OrderStore>,
    refresher: Arc<dyn ListRefresher>,
}

impl fmt::Debug for MoveExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveExecutor")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl MoveExecutor {
    /// Creates an executor persisting through `store` and notifying `refresher`
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, refresher: Arc<dyn ListRefresher>, step: u64) -> Self {
        Self {
            resolver: PositionResolver::new(Arc::clone(&store), step),
            store,
            refresher,
        }
    }

    /// The resolver used to allocate positions
    #[must_use]
    pub const fn resolver(&self) -> &PositionResolver {
        &self.resolver
    }

    /// Moves `item` next to `anchor` within `collection`
    ///
    /// Returns the position the item was stored at.
    ///
    /// # Errors
    ///
    /// Any resolution error, or the store's failure to persist. Failures are
    /// not retried and no list is refreshed.
    pub async fn move_item(
        &self,
        item: ItemId,
        collection: CollectionId,
        anchor: Anchor,
        side: Side,
    ) -> OrderResult<Position> {
        self.move_to_collection(item, collection, collection, anchor, side)
            .await
    }

    /// Moves `item` from one collection into another, next to `anchor`
    ///
    /// The position is resolved in the destination. Both lists are refreshed
    /// on success.
    ///
    /// # Errors
    ///
    /// - [`OrderError::SelfAnchor`] if `anchor` is the moved item
    /// - any resolution error in the destination
    /// - [`OrderError::Store`] if persisting fails
    pub async fn move_to_collection(
        &self,
        item: ItemId,
        from: CollectionId,
        to: CollectionId,
        anchor: Anchor,
        side: Side,
    ) -> OrderResult<Position> {
        let span = crate::trace_operation!(
            span_names::ORDER_MOVE,
            item = %item,
            from = %from,
            to = %to
        );

        self.execute_move(item, from, to, anchor, side)
            .instrument(span)
            .await
    }

    async fn execute_move(
        &self,
        item: ItemId,
        from: CollectionId,
        to: CollectionId,
        anchor: Anchor,
        side: Side,
    ) -> OrderResult<Position> {
        if anchor.item() == Some(item) {
            return Err(OrderError::SelfAnchor(item));
        }

        let position = self.resolver.resolve(&to, anchor, side, Some(item)).await?;
        let record = MoveRecord {
            item,
            from,
            to,
            position,
        };

        self.store.persist_move(&record).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to persist move");
            OrderError::from(e)
        })?;

        tracing::info!(position = %position, "Item moved");
        self.refresher.reload_list(&from);
        if to != from {
            self.refresher.reload_list(&to);
        }
        Ok(position)
    }

    /// Adds `item` to collection `to` next to `anchor`, keeping its other entries
    ///
    /// # Errors
    ///
    /// - [`OrderError::SelfAnchor`] if `anchor` is the copied item
    /// - [`OrderError::DuplicateItem`] if `to` already contains the item
    /// - any resolution error in the destination
    /// - [`OrderError::Store`] if persisting fails
    pub async fn copy_to_collection(
        &self,
        item: ItemId,
        to: CollectionId,
        anchor: Anchor,
        side: Side,
    ) -> OrderResult<Position> {
        let span = crate::trace_operation!(span_names::ORDER_COPY, item = %item, to = %to);

        self.execute_copy(item, to, anchor, side)
            .instrument(span)
            .await
    }

    async fn execute_copy(
        &self,
        item: ItemId,
        to: CollectionId,
        anchor: Anchor,
        side: Side,
    ) -> OrderResult<Position> {
        if anchor.item() == Some(item) {
            return Err(OrderError::SelfAnchor(item));
        }

        let destination = self.resolver.reader().read(&to).await?;
        if destination.contains(item) {
            return Err(OrderError::DuplicateItem {
                item,
                collection: to,
            });
        }

        let position = self.resolver.resolve(&to, anchor, side, None).await?;
        let record = CopyRecord { item, to, position };

        self.store.persist_copy(&record).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to persist copy");
            OrderError::from(e)
        })?;

        tracing::info!(position = %position, "Item copied");
        self.refresher.reload_list(&to);
        Ok(position)
    }

    /// Removes `item` from collection `from`
    ///
    /// No position is allocated and the remaining siblings keep theirs. Only
    /// `from` is refreshed; other collections holding the item are untouched.
    ///
    /// # Errors
    ///
    /// [`OrderError::Store`] if the item is not in `from` or persisting
    /// fails. Failures are not retried and no list is refreshed.
    pub async fn remove_from_collection(
        &self,
        item: ItemId,
        from: CollectionId,
    ) -> OrderResult<()> {
        let span = crate::trace_operation!(span_names::ORDER_REMOVE, item = %item, from = %from);

        self.execute_remove(item, from).instrument(span).await
    }

    async fn execute_remove(&self, item: ItemId, from: CollectionId) -> OrderResult<()> {
        self.store
            .persist_remove(&RemoveRecord { item, from })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to persist removal");
                OrderError::from(e)
            })?;

        tracing::info!("Item removed");
        self.refresher.reload_list(&from);
        Ok(())
    }

    /// Applies a drag-and-drop gesture for `item` currently in `from`
    ///
    /// Returns `Ok(None)` when the drop does not apply (e.g. into a leaf row,
    /// or a folder dropped into itself) and nothing was changed.
    ///
    /// # Errors
    ///
    /// Same as [`MoveExecutor::move_to_collection`].
    pub async fn apply_drop(
        &self,
        item: ItemId,
        from: CollectionId,
        target: &DropTarget,
    ) -> OrderResult<Option<Position>> {
        let Some(placement) = target.placement() else {
            tracing::debug!(item = %item, "Drop ignored");
            return Ok(None);
        };
        if placement.anchor.item() == Some(item)
            || placement.collection == CollectionId::Folder(item)
        {
            tracing::debug!(item = %item, "Drop onto itself ignored");
            return Ok(None);
        }

        self.move_to_collection(
            item,
            from,
            placement.collection,
            placement.anchor,
            placement.side,
        )
        .await
        .map(Some)
    }
}
