//! Keyframe-driven operations.
//!
//! These stand in for real scene objects when planning an export: their
//! validity comes from a sorted list of key ticks, and their writes are
//! recorded in an [`ExportLog`] instead of authoring anything.

use serde::{Deserialize, Serialize};

use super::log::{ExportEvent, ExportLog};
use crate::core::{ExportTime, Interval, ObjectExportOp, TimeCode, TransformExportOp};
use crate::util::{Result, Tick, TIME_NEG_INFINITY, TIME_POS_INFINITY};

/// How values evolve between keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Value holds until the next key.
    #[default]
    Step,
    /// Value changes continuously between the first and last key.
    Linear,
}

/// Validity of keyed data at `time`.
///
/// With no keys the data never changes. Outside the keyed range the value is
/// held, in both modes.
pub fn keyed_validity(keys: &[Tick], interpolation: Interpolation, time: Tick) -> Interval {
    let (Some(&first), Some(&last)) = (keys.first(), keys.last()) else {
        return Interval::FOREVER;
    };
    match interpolation {
        Interpolation::Linear if keys.len() > 1 => {
            if time < first {
                Interval::new(TIME_NEG_INFINITY, first)
            } else if time >= last {
                Interval::from_start(last)
            } else {
                Interval::instant(time)
            }
        }
        _ => {
            // Number of keys at or before `time`.
            let idx = keys.partition_point(|&k| k <= time);
            let start = if idx == 0 { TIME_NEG_INFINITY } else { keys[idx - 1] };
            let end = if idx == keys.len() { TIME_POS_INFINITY } else { keys[idx] - 1 };
            Interval::new(start, end)
        }
    }
}

/// Object operation driven by key ticks.
#[derive(Clone, Debug)]
pub struct KeyedObjectOp {
    name: String,
    keys: Vec<Tick>,
    interpolation: Interpolation,
    log: ExportLog,
}

impl KeyedObjectOp {
    /// Keys are sorted and deduplicated.
    pub fn new(name: impl Into<String>, mut keys: Vec<Tick>, interpolation: Interpolation, log: ExportLog) -> Self {
        keys.sort_unstable();
        keys.dedup();
        Self {
            name: name.into(),
            keys,
            interpolation,
            log,
        }
    }

    /// Operation whose data never changes.
    pub fn constant(name: impl Into<String>, log: ExportLog) -> Self {
        Self::new(name, Vec::new(), Interpolation::Step, log)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[Tick] {
        &self.keys
    }
}

impl ObjectExportOp for KeyedObjectOp {
    fn validity_interval(&self, time: Tick) -> Interval {
        keyed_validity(&self.keys, self.interpolation, time)
    }

    fn write(&mut self, time: &ExportTime) -> Result<()> {
        self.log.record(ExportEvent::ObjectWrite {
            object: self.name.clone(),
            time: time.time(),
            time_code: time.time_code(),
            first_frame: time.is_first_frame(),
        });
        Ok(())
    }

    fn post_export(&mut self) -> Result<()> {
        self.log.record(ExportEvent::PostExport { object: self.name.clone() });
        Ok(())
    }
}

/// Output target of a transform operation: the samples written for one node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformTrack {
    pub name: String,
    pub samples: Vec<(Tick, TimeCode)>,
}

impl TransformTrack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
        }
    }

    /// Sampled ticks in write order.
    pub fn times(&self) -> Vec<Tick> {
        self.samples.iter().map(|(t, _)| *t).collect()
    }
}

/// Transform operation appending every sample to its [`TransformTrack`].
#[derive(Clone, Debug, Default)]
pub struct TrackTransformOp {
    log: ExportLog,
}

impl TrackTransformOp {
    pub fn new(log: ExportLog) -> Self {
        Self { log }
    }
}

impl TransformExportOp<TransformTrack> for TrackTransformOp {
    fn write(&mut self, time: &ExportTime, target: &mut TransformTrack) -> Result<()> {
        target.samples.push((time.time(), time.time_code()));
        self.log.record(ExportEvent::TransformWrite {
            object: target.name.clone(),
            time: time.time(),
        });
        Ok(())
    }
}
