//! Gap allocation between neighbouring positions
//!
//! Pure and synchronous: the result depends only on the snapshot, the
//! requested placement and the step. Running out of room between two
//! neighbours is an expected outcome reported as [`Allocation::Exhausted`],
//! which the resolver answers with a single cleanup.

use crate::error::{OrderError, OrderResult};
use crate::models::{Anchor, Position, Side, Snapshot};

/// The two neighbours an insertion had to fit between
///
/// `lower` is `None` when inserting before the first sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// Neighbour below the insertion point
    pub lower: Option<Position>,
    /// Neighbour above the insertion point, or the last position when
    /// appending overflowed
    pub upper: Position,
}

/// Outcome of a single allocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// A position strictly between the neighbours
    Free(Position),
    /// No integer is left between the neighbours
    Exhausted(Gap),
}

impl Allocation {
    /// Returns the allocated position, if any
    #[must_use]
    pub const fn position(self) -> Option<Position> {
        match self {
            Self::Free(position) => Some(position),
            Self::Exhausted(_) => None,
        }
    }

    /// Returns true if the gap ran out
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted(_))
    }
}

/// Computes a position for inserting next to `anchor`
///
/// | placement                 | result                                  |
/// |---------------------------|-----------------------------------------|
/// | empty collection          | `step`                                  |
/// | after last / `End`        | `last + step`                           |
/// | after `p[i]`              | `floor((p[i] + p[i+1]) / 2)` if gap > 1 |
/// | before first / `Start`    | `floor(p[0] / 2)` if `p[0] > 1`         |
/// | before `p[i]`             | `floor((p[i-1] + p[i]) / 2)` if gap > 1 |
///
/// Anything else is [`Allocation::Exhausted`]. Appending only exhausts if
/// `last + step` overflows `u64`.
///
/// # Errors
///
/// Returns [`OrderError::AnchorNotFound`] if `anchor` names an item that is
/// not in the snapshot.
pub fn allocate(
    snapshot: &Snapshot,
    anchor: Anchor,
    side: Side,
    step: u64,
) -> OrderResult<Allocation> {
    let entries = snapshot.entries();

    let Some(last) = snapshot.last() else {
        return match anchor {
            Anchor::Start | Anchor::End => Ok(Allocation::Free(Position::new(step))),
            Anchor::Item(_) => Err(OrderError::AnchorNotFound {
                collection: snapshot.collection(),
                anchor,
            }),
        };
    };

    let (index, side) = match anchor {
        Anchor::Start => (0, Side::Before),
        Anchor::End => (entries.len() - 1, Side::After),
        Anchor::Item(id) => {
            let index = snapshot
                .index_of(id)
                .ok_or(OrderError::AnchorNotFound {
                    collection: snapshot.collection(),
                    anchor,
                })?;
            (index, side)
        }
    };

    let current = entries[index].position;
    let allocation = match side {
        Side::After if index + 1 == entries.len() => match last.position.checked_add(step) {
            Some(position) => Allocation::Free(position),
            None => Allocation::Exhausted(Gap {
                lower: Some(last.position),
                upper: last.position,
            }),
        },
        Side::After => between(current, entries[index + 1].position),
        Side::Before if index == 0 => match current.halved() {
            Some(position) => Allocation::Free(position),
            None => Allocation::Exhausted(Gap {
                lower: None,
                upper: current,
            }),
        },
        Side::Before => between(entries[index - 1].position, current),
    };

    Ok(allocation)
}

fn between(lower: Position, upper: Position) -> Allocation {
    match lower.midpoint(upper) {
        Some(position) => Allocation::Free(position),
        None => Allocation::Exhausted(Gap {
            lower: Some(lower),
            upper,
        }),
    }
}
