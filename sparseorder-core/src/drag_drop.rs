//! Drag-and-drop model for reordering
//!
//! Pure data model translating a drop gesture into a placement that the
//! [`MoveExecutor`](crate::order::MoveExecutor) can carry out, so drops can be
//! tested without any UI toolkit.

use crate::models::{Anchor, CollectionId, ItemId, Side};

/// Drop position relative to a target row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Drop before the target item
    Before,
    /// Drop after the target item
    After,
    /// Drop into the target item (folders only)
    Into,
}

/// Kind of row being dropped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A folder; its own items form a nested collection
    Folder,
    /// A leaf item such as a source
    Leaf,
}

/// Returns whether `position` makes sense for a row of `kind`
#[must_use]
pub const fn is_valid_drop_position(position: DropPosition, kind: ItemKind) -> bool {
    match kind {
        ItemKind::Leaf => !matches!(position, DropPosition::Into),
        ItemKind::Folder => true,
    }
}

/// Destination of a drop gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Collection holding the target row
    pub collection: CollectionId,
    /// Item under the pointer
    pub item: ItemId,
    /// Kind of the item under the pointer
    pub kind: ItemKind,
    /// Where relative to the row the drop landed
    pub position: DropPosition,
}

/// Resolved destination for a dragged item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Destination collection
    pub collection: CollectionId,
    /// Sibling to place next to
    pub anchor: Anchor,
    /// Side of the anchor
    pub side: Side,
}

impl DropTarget {
    /// Translates the drop into a placement
    ///
    /// Dropping before/after a row places the item next to it in the row's
    /// collection. Dropping into a folder appends to the folder's collection.
    /// Returns `None` for drops that don't apply (into a leaf).
    #[must_use]
    pub const fn placement(&self) -> Option<Placement> {
        if !is_valid_drop_position(self.position, self.kind) {
            return None;
        }
        Some(match self.position {
            DropPosition::Before => Placement {
                collection: self.collection,
                anchor: Anchor::Item(self.item),
                side: Side::Before,
            },
            DropPosition::After => Placement {
                collection: self.collection,
                anchor: Anchor::Item(self.item),
                side: Side::After,
            },
            DropPosition::Into => Placement {
                collection: CollectionId::Folder(self.item),
                anchor: Anchor::End,
                side: Side::After,
            },
        })
    }
}
