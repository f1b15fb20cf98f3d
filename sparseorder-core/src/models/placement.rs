//! Where a moved item should land relative to its new siblings.

use std::fmt;

use super::collection::ItemId;

/// Which side of the anchor the item is inserted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Immediately before the anchor
    Before,
    /// Immediately after the anchor
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Sibling the insertion is relative to
///
/// `Start` and `End` are sentinels for the edges of the collection; the
/// [`Side`] is ignored for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Before the first sibling
    Start,
    /// After the last sibling
    End,
    /// Next to a specific sibling
    Item(ItemId),
}

impl Anchor {
    /// Returns the anchored item id, if any
    #[must_use]
    pub const fn item(&self) -> Option<ItemId> {
        match self {
            Self::Item(id) => Some(*id),
            Self::Start | Self::End => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
            Self::Item(id) => write!(f, "{id}"),
        }
    }
}
