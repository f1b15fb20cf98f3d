//! Point-in-time view of a collection's sibling order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::collection::{CollectionId, ItemId};
use super::position::Position;
use crate::error::{OrderError, OrderResult};

/// One sibling as seen in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiblingEntry {
    /// Item id
    pub id: ItemId,
    /// Current position of the item
    pub position: Position,
}

impl SiblingEntry {
    /// Creates a new entry
    #[must_use]
    pub const fn new(id: ItemId, position: Position) -> Self {
        Self { id, position }
    }
}

/// Immutable, ascending sequence of siblings of one collection
///
/// A snapshot is read fresh for every allocation attempt and is never kept
/// across a cleanup. Construction checks that positions strictly increase and
/// ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    collection: CollectionId,
    entries: Vec<SiblingEntry>,
}

impl Snapshot {
    /// Builds a snapshot from entries already in display order
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::CorruptSnapshot`] if positions are not strictly
    /// increasing or an id appears twice.
    pub fn new(collection: CollectionId, entries: Vec<SiblingEntry>) -> OrderResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(OrderError::CorruptSnapshot {
                    collection,
                    reason: format!("item {} listed twice", entry.id),
                });
            }
        }

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].position >= pair[1].position)
        {
            return Err(OrderError::CorruptSnapshot {
                collection,
                reason: format!(
                    "position {} of {} is not below position {} of {}",
                    pair[0].position, pair[0].id, pair[1].position, pair[1].id
                ),
            });
        }

        Ok(Self {
            collection,
            entries,
        })
    }

    /// An empty snapshot for the collection
    #[must_use]
    pub const fn empty(collection: CollectionId) -> Self {
        Self {
            collection,
            entries: Vec::new(),
        }
    }

    /// Collection this snapshot was read from
    #[must_use]
    pub const fn collection(&self) -> CollectionId {
        self.collection
    }

    /// Siblings in ascending position order
    #[must_use]
    pub fn entries(&self) -> &[SiblingEntry] {
        &self.entries
    }

    /// Number of siblings
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the collection has no siblings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First sibling, if any
    #[must_use]
    pub fn first(&self) -> Option<&SiblingEntry> {
        self.entries.first()
    }

    /// Last sibling, if any
    #[must_use]
    pub fn last(&self) -> Option<&SiblingEntry> {
        self.entries.last()
    }

    /// Index of an item in display order
    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Returns true if the item is a sibling in this snapshot
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of an item, if present
    #[must_use]
    pub fn position_of(&self, id: ItemId) -> Option<Position> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.position)
    }

    /// The same snapshot with one item left out
    ///
    /// Used so that an item being moved does not count as its own neighbour.
    #[must_use]
    pub fn without(&self, id: ItemId) -> Self {
        Self {
            collection: self.collection,
            entries: self
                .entries
                .iter()
                .filter(|e| e.id != id)
                .copied()
                .collect(),
        }
    }

    /// Consumes the snapshot, returning its entries
    #[must_use]
    pub fn into_entries(self) -> Vec<SiblingEntry> {
        self.entries
    }
}
