//! Sparse integer order keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default spacing between neighbours after a renumber, and the increment
/// used when appending past the last item.
pub const DEFAULT_STEP: u64 = 1000;

/// Order key of an item within its collection
///
/// Positions are sparse: siblings are kept `step` apart after a cleanup so
/// that many midpoint insertions fit between two neighbours before their gap
/// runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u64);

impl Position {
    /// Creates a position from its raw value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Position of the `index`-th sibling (0-based) after a renumber with `step`
    ///
    /// Returns `None` if the value does not fit in `u64`.
    #[must_use]
    pub fn nth(index: usize, step: u64) -> Option<Self> {
        let rank = u64::try_from(index).ok()?.checked_add(1)?;
        rank.checked_mul(step).map(Self)
    }

    /// Floor of the midpoint between `self` and a strictly greater `upper`
    ///
    /// Returns `None` when no integer lies strictly between the two.
    #[must_use]
    pub const fn midpoint(self, upper: Self) -> Option<Self> {
        if upper.0 <= self.0 || upper.0 - self.0 <= 1 {
            return None;
        }
        Some(Self(self.0 + (upper.0 - self.0) / 2))
    }

    /// Half of this position, if that is still a positive value below it
    #[must_use]
    pub const fn halved(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 / 2)) } else { None }
    }

    /// Adds `step`, returning `None` on overflow
    #[must_use]
    pub const fn checked_add(self, step: u64) -> Option<Self> {
        match self.0.checked_add(step) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Position {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
