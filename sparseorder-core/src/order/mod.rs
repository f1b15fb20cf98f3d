//! Position allocation and the cleanup-and-retry protocol
//!
//! Layered leaves first:
//! - [`SnapshotReader`] reads validated sibling snapshots from the store
//! - [`allocate`] picks a position between two neighbours, or reports
//!   exhaustion
//! - [`PositionResolver`] renumbers an exhausted collection once and retries
//! - [`MoveExecutor`] resolves, persists and asks the UI to refresh

mod allocator;
mod coordinator;
mod executor;
mod reader;

pub use allocator::{Allocation, Gap, allocate};
pub use coordinator::{CleanupBudget, MAX_CLEANUPS, PositionResolver, Resolution};
pub use executor::MoveExecutor;
pub use reader::{FolderSummary, SnapshotReader};
