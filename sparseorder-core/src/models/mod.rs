//! Core data structures: positions, collection ids, placements and snapshots.

mod collection;
mod placement;
mod position;
mod snapshot;

pub use collection::{CollectionId, ItemId, ParseCollectionIdError, ROOT_COLLECTION_NAME};
pub use placement::{Anchor, Side};
pub use position::{DEFAULT_STEP, Position};
pub use snapshot::{SiblingEntry, Snapshot};
