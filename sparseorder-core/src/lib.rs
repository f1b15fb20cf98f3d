//! `SparseOrder` Core Library
//!
//! This crate keeps items of ordered collections (folders, and the sources
//! filed under each folder) in user-defined order using sparse integer
//! positions. Moving an item only rewrites that item's position; when two
//! neighbours leave no integer gap, the collection is renumbered once and the
//! allocation retried.
//!
//! # Crate Structure
//!
//! - [`models`] - Positions, collection ids, placements and snapshots
//! - [`order`] - Snapshot reader, gap allocator, cleanup resolver, move executor
//! - [`store`] - Store and refresh traits, in-memory store
//! - [`drag_drop`] - Translating drop gestures into placements
//! - [`config`] - Settings loaded from TOML
//! - [`tracing`] - Subscriber setup, span and field names

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod drag_drop;
pub mod error;
pub mod models;
pub mod order;
pub mod store;
pub mod tracing;

pub use config::{LoggingSettings, OrderSettings, load_settings};
pub use drag_drop::{DropPosition, DropTarget, ItemKind, Placement, is_valid_drop_position};
pub use error::{ConfigError, ConfigResult, OrderError, OrderResult, StoreError, StoreResult};
pub use models::{
    Anchor, CollectionId, DEFAULT_STEP, ItemId, Position, Side, SiblingEntry, Snapshot,
};
pub use order::{
    Allocation, CleanupBudget, FolderSummary, Gap, MAX_CLEANUPS, MoveExecutor, PositionResolver,
    Resolution, SnapshotReader, allocate,
};
pub use store::{
    CopyRecord, Layout, ListRefresher, MemoryStore, MoveRecord, NoopRefresher, OrderStore,
    RecordingRefresher, RemoveRecord,
};
