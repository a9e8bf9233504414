//! Validity intervals.
//!
//! An interval is the closed range of ticks over which an operation
//! guarantees its authored output does not change.

use serde::{Deserialize, Serialize};

use crate::util::{Tick, TIME_NEG_INFINITY, TIME_POS_INFINITY};

/// Closed tick range `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Tick,
    pub end: Tick,
}

impl Interval {
    /// Unbounded interval: the output never changes.
    pub const FOREVER: Self = Self {
        start: TIME_NEG_INFINITY,
        end: TIME_POS_INFINITY,
    };

    /// Create an interval from its bounds.
    #[inline]
    pub const fn new(start: Tick, end: Tick) -> Self {
        Self { start, end }
    }

    /// Interval covering a single tick.
    #[inline]
    pub const fn instant(time: Tick) -> Self {
        Self { start: time, end: time }
    }

    /// Interval starting at `start` and never ending.
    #[inline]
    pub const fn from_start(start: Tick) -> Self {
        Self { start, end: TIME_POS_INFINITY }
    }

    /// Check that `start <= end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Check if both bounds are the infinity sentinels.
    #[inline]
    pub fn is_forever(&self) -> bool {
        *self == Self::FOREVER
    }

    /// Check if the interval contains the given tick.
    #[inline]
    pub fn contains(&self, time: Tick) -> bool {
        self.start <= time && time <= self.end
    }

    /// Malformed intervals (`start > end`) degrade to [`Interval::FOREVER`].
    #[inline]
    pub fn sanitized(self) -> Self {
        if self.is_valid() {
            self
        } else {
            Self::FOREVER
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FOREVER
    }
}
