//! Export timeline and sampling policy.
//!
//! The timeline maps each time point that must be visited to an
//! [`ExportRequest`]: whether node transforms are sampled there, and which
//! object operations are due. Transforms have no validity information, so
//! they are seeded on the fixed cadence of the [`TimeConfig`]. Objects are
//! seeded once, from their validity at the start of the range, and are
//! rescheduled by the execution loop as their intervals expire.
//!
//! Object sampling follows a step-function policy: an object is written at
//! the start and at the end of every validity interval that lies strictly
//! inside the export range, which is enough for a linearly-interpolating
//! consumer to reconstruct the data exactly.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use super::registry::OpId;
use crate::core::{Interval, TimeConfig};
use crate::util::Tick;

/// Work due at a single time point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportRequest {
    transform: bool,
    objects: SmallVec<[OpId; 4]>,
}

impl ExportRequest {
    /// Whether node transforms are sampled at this time.
    #[inline]
    pub fn needs_transform_pass(&self) -> bool {
        self.transform
    }

    /// Object operations due at this time, in registration order.
    #[inline]
    pub fn due_objects(&self) -> &[OpId] {
        &self.objects
    }

    /// Insert keeping registration order; an id is never due twice.
    fn push_object(&mut self, id: OpId) {
        if let Err(pos) = self.objects.binary_search(&id) {
            self.objects.insert(pos, id);
        }
    }
}

/// Ordered `time -> request` map, consumed front to back.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    requests: BTreeMap<Tick, ExportRequest>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline with a transform pass at every cadence tick of `config`.
    pub fn with_transform_passes(config: &TimeConfig) -> Self {
        let mut timeline = Self::new();
        for time in config.sample_times() {
            timeline.requests.entry(time).or_default().transform = true;
        }
        timeline
    }

    /// Mark an object operation as due at `time`, merging with any request
    /// already there.
    pub fn schedule(&mut self, time: Tick, id: OpId) {
        self.requests.entry(time).or_default().push_object(id);
    }

    /// Remove and return the earliest request.
    pub fn pop_next(&mut self) -> Option<(Tick, ExportRequest)> {
        self.requests.pop_first()
    }

    /// Request at `time`, if any.
    pub fn get(&self, time: Tick) -> Option<&ExportRequest> {
        self.requests.get(&time)
    }

    /// Scheduled times in ascending order.
    pub fn times(&self) -> impl Iterator<Item = Tick> + '_ {
        self.requests.keys().copied()
    }

    /// Iterate `(time, request)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, &ExportRequest)> {
        self.requests.iter().map(|(t, r)| (*t, r))
    }

    /// Number of distinct time points.
    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// First time an object must be written, from its validity at the start of
/// the range.
///
/// When the interval ends strictly inside the range, the object is first
/// written at the last tick before its data changes; otherwise at the start.
pub fn first_export_time(interval_at_start: Interval, config: &TimeConfig) -> Tick {
    let start = config.start_time();
    let last_of_interval = interval_at_start.end;
    if last_of_interval > start && last_of_interval < config.end_time() {
        last_of_interval
    } else {
        start
    }
}

/// Next time an object must be written after being written at `current`.
///
/// `next_interval` is the object's validity one time step after `current`.
/// Returns `None` when the rest of the range is already covered.
pub fn next_export_time(current: Tick, next_interval: Interval, config: &TimeConfig) -> Option<Tick> {
    let end_time = config.end_time();
    let candidate = if next_interval.end >= end_time {
        // Valid through the end of the range: only the start matters.
        next_interval.start
    } else if current == next_interval.start {
        next_interval.end
    } else {
        next_interval.start
    };
    let candidate = candidate.min(end_time);
    (candidate > current).then_some(candidate)
}
