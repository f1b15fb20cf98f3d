//! Position resolution with a single cleanup retry
//!
//! The resolver reads a snapshot and asks the allocator for a position. If the
//! gap is exhausted it asks the store to renumber the collection, reads again
//! and allocates once more. A second exhaustion means the store's renumbering
//! did not separate neighbours; that is reported as
//! [`OrderError::PositionSpaceExhausted`] instead of looping.

use std::fmt;
use std::sync::Arc;

use tracing::Instrument;

use crate::error::{OrderError, OrderResult};
use crate::models::{Anchor, CollectionId, ItemId, Position, Side};
use crate::order::allocator::{Allocation, allocate};
use crate::order::reader::SnapshotReader;
use crate::store::OrderStore;
use crate::tracing::span_names;

/// Number of renumbering passes allowed per resolution
pub const MAX_CLEANUPS: u32 = 1;

/// Tracks how many cleanups a resolution has spent
///
/// The limit is fixed at [`MAX_CLEANUPS`]: renumbering is expected to leave
/// `step`-wide gaps, so needing a second one is a store bug, not bad luck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupBudget {
    spent: u32,
}

impl Default for CleanupBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanupBudget {
    /// Creates an unspent budget
    #[must_use]
    pub const fn new() -> Self {
        Self { spent: 0 }
    }

    /// Returns whether another cleanup may run
    #[must_use]
    pub const fn can_cleanup(&self) -> bool {
        self.spent < MAX_CLEANUPS
    }

    /// Spends one cleanup
    ///
    /// Returns `false`, spending nothing, if the budget is already used up.
    pub fn try_spend(&mut self) -> bool {
        if !self.can_cleanup() {
            return false;
        }
        self.spent += 1;
        true
    }

    /// Cleanups spent so far
    #[must_use]
    pub const fn spent(&self) -> u32 {
        self.spent
    }
}

/// Result of a successful resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Allocated position
    pub position: Position,
    /// Number of cleanups that were needed (0 or 1)
    pub cleanups: u32,
}

/// Resolves positions, renumbering a collection at most once per call
#[derive(Clone)]
pub struct PositionResolver {
    reader: SnapshotReader,
    store: Arc<dyn OrderStore>,
    step: u64,
}

impl fmt::Debug for PositionResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionResolver")
            .field("backend", &self.store.backend_id())
            .field("step", &self.step)
            .finish()
    }
}

impl PositionResolver {
    /// Creates a resolver reading from and cleaning up through `store`
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, step: u64) -> Self {
        Self {
            reader: SnapshotReader::new(Arc::clone(&store), step),
            store,
            step,
        }
    }

    /// The reader used for snapshots
    #[must_use]
    pub const fn reader(&self) -> &SnapshotReader {
        &self.reader
    }

    /// Spacing used for appends
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Resolves a position next to `anchor` in `collection`
    ///
    /// `exclude` leaves the item being moved out of the neighbour computation.
    ///
    /// # Errors
    ///
    /// - [`OrderError::CollectionNotFound`] / [`OrderError::AnchorNotFound`]
    /// - [`OrderError::PositionSpaceExhausted`] if the gap is still exhausted
    ///   after one renumber
    /// - [`OrderError::Store`] if the read or the renumber fails
    pub async fn resolve(
        &self,
        collection: &CollectionId,
        anchor: Anchor,
        side: Side,
        exclude: Option<ItemId>,
    ) -> OrderResult<Position> {
        self.resolve_detailed(collection, anchor, side, exclude)
            .await
            .map(|resolution| resolution.position)
    }

    /// Same as [`PositionResolver::resolve`], also reporting cleanups spent
    ///
    /// # Errors
    ///
    /// See [`PositionResolver::resolve`].
    pub async fn resolve_detailed(
        &self,
        collection: &CollectionId,
        anchor: Anchor,
        side: Side,
        exclude: Option<ItemId>,
    ) -> OrderResult<Resolution> {
        let span = crate::trace_operation!(
            span_names::ORDER_RESOLVE,
            collection = %collection,
            anchor = %anchor,
            side = %side,
            backend = self.store.backend_id()
        );
        self.resolve_with_budget(collection, anchor, side, exclude)
            .instrument(span)
            .await
    }

    async fn resolve_with_budget(
        &self,
        collection: &CollectionId,
        anchor: Anchor,
        side: Side,
        exclude: Option<ItemId>,
    ) -> OrderResult<Resolution> {
        let mut budget = CleanupBudget::new();

        loop {
            let snapshot = self.reader.read_excluding(collection, exclude).await?;

            let gap = match allocate(&snapshot, anchor, side, self.step)? {
                Allocation::Free(position) => {
                    tracing::debug!(
                        position = %position,
                        cleanups = budget.spent(),
                        "Position allocated"
                    );
                    return Ok(Resolution {
                        position,
                        cleanups: budget.spent(),
                    });
                }
                Allocation::Exhausted(gap) => gap,
            };

            if !budget.try_spend() {
                tracing::error!(
                    collection = %collection,
                    upper = %gap.upper,
                    "Gap still exhausted after cleanup; store did not renumber"
                );
                return Err(OrderError::PositionSpaceExhausted {
                    collection: *collection,
                });
            }

            tracing::info!(
                upper = %gap.upper,
                lower = gap.lower.map(|p| p.get()),
                item_count = snapshot.len(),
                "Gap exhausted, renumbering collection"
            );
            self.cleanup(collection).await?;
        }
    }

    /// Asks the store to renumber `collection`
    ///
    /// # Errors
    ///
    /// Propagates the store failure unchanged.
    pub async fn cleanup(&self, collection: &CollectionId) -> OrderResult<()> {
        let span = crate::trace_operation!(span_names::ORDER_CLEANUP, collection = %collection);
        self.store
            .renumber(collection)
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::warn!(collection = %collection, error = %e, "Renumber failed");
                OrderError::from(e)
            })
    }
}
