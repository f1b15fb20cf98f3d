//! Error types for `SparseOrder`
//!
//! This module defines the error hierarchy used across the crate:
//! - [`OrderError`] for position resolution and move execution
//! - [`StoreError`] for failures reported by an [`OrderStore`](crate::store::OrderStore)
//! - [`ConfigError`] for settings loading and validation

use thiserror::Error;

use crate::models::{Anchor, CollectionId, ItemId};

/// Errors raised by the ordering core
///
/// Exhaustion of a single gap is not an error: it is reported by the
/// allocator as [`Allocation::Exhausted`](crate::order::Allocation) and
/// handled inside the resolver. Only exhaustion that survives a cleanup
/// escapes, as [`OrderError::PositionSpaceExhausted`].
#[derive(Debug, Error)]
pub enum OrderError {
    /// The collection is unknown to the store
    #[error("Collection not found: {0}")]
    CollectionNotFound(CollectionId),

    /// The anchor item is not a sibling in the collection
    #[error("Anchor {anchor} not found in collection {collection}")]
    AnchorNotFound {
        /// Collection that was searched
        collection: CollectionId,
        /// The missing anchor
        anchor: Anchor,
    },

    /// No integer gap remains even after renumbering the collection
    #[error("Position space exhausted in collection {collection} after cleanup")]
    PositionSpaceExhausted {
        /// Collection whose renumbering did not separate neighbours
        collection: CollectionId,
    },

    /// Snapshot positions are not strictly increasing or ids repeat
    #[error("Corrupt snapshot for collection {collection}: {reason}")]
    CorruptSnapshot {
        /// Collection the snapshot was read from
        collection: CollectionId,
        /// What was wrong with it
        reason: String,
    },

    /// An item was asked to move relative to itself
    #[error("Item {0} cannot be placed relative to itself")]
    SelfAnchor(ItemId),

    /// The destination collection already holds the item
    #[error("Item {item} is already in collection {collection}")]
    DuplicateItem {
        /// The item being copied or moved
        item: ItemId,
        /// Destination collection
        collection: CollectionId,
    },

    /// Failure reported by the backing store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Returns true for the "not found" class of errors
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CollectionNotFound(_)
                | Self::AnchorNotFound { .. }
                | Self::Store(StoreError::CollectionNotFound(_) | StoreError::ItemNotFound { .. })
        )
    }
}

/// Result type for ordering operations
pub type OrderResult<T> = std::result::Result<T, OrderError>;

/// Errors reported by an order store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Collection does not exist in the store
    #[error("Collection not found: {0}")]
    CollectionNotFound(CollectionId),

    /// Item does not exist in the given collection
    #[error("Item {item} not found in collection {collection}")]
    ItemNotFound {
        /// Missing item
        item: ItemId,
        /// Collection that was searched
        collection: CollectionId,
    },

    /// Item already exists in the given collection
    #[error("Item {item} already exists in collection {collection}")]
    DuplicateItem {
        /// Duplicated item
        item: ItemId,
        /// Collection holding it
        collection: CollectionId,
    },

    /// Position is already taken by another sibling
    #[error("Position {position} already taken in collection {collection}")]
    PositionTaken {
        /// The conflicting position value
        position: u64,
        /// Collection holding it
        collection: CollectionId,
    },

    /// The backend could not be reached or refused the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// I/O failure while persisting
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`OrderSettings`](crate::config::OrderSettings)
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// A setting has an unusable value
    #[error("Invalid value for {field}: {reason}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
