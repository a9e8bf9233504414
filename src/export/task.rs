//! Animated export task.
//!
//! Queues export operations and later executes them batched per host time.
//! Evaluating scene objects is expensive and hosts typically cache object
//! state for the last evaluated time, so everything due at a time is written
//! together, and each time is visited exactly once, in ascending order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::cancel::CancellationToken;
use super::progress::{
    ProgressReporter, FRAMES_PROGRESS_LABEL, OBJECTS_PROGRESS_LABEL, POST_EXPORT_PROGRESS_LABEL,
    TRANSFORMS_PROGRESS_LABEL,
};
use super::registry::{ObjectSlot, OpId, OperationRegistry};
use super::timeline::{first_export_time, next_export_time, Timeline};
use crate::core::{ExportTime, Interval, ObjectExportOp, TimeConfig, TransformExportOp};
use crate::util::{Error, Result, Tick};

/// How object operations due at the same time are run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One operation after another, on the calling thread.
    #[default]
    Sequential,
    /// Operations due at one time run on the rayon pool. Times are still
    /// visited one after another and scheduling is applied in registration
    /// order, so the resulting timeline is identical to `Sequential`.
    ParallelPerTick,
}

/// Outcome of a completed export.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Every visited time, in visit order.
    pub visited_times: Vec<Tick>,
    /// Number of object write calls.
    pub object_writes: usize,
    /// Number of transform write calls.
    pub transform_writes: usize,
    /// Number of post-export calls.
    pub finalized: usize,
}

/// Batched export of object and transform operations over a time range.
pub struct AnimExportTask<H = ()> {
    config: TimeConfig,
    registry: OperationRegistry<H>,
    mode: ExecutionMode,
    cancel: Option<CancellationToken>,
}

impl<H> AnimExportTask<H> {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            registry: OperationRegistry::new(),
            mode: ExecutionMode::default(),
            cancel: None,
        }
    }

    /// Set how operations due at the same time are run.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Poll `token` before each visited time.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[inline]
    pub fn config(&self) -> &TimeConfig {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    #[inline]
    pub fn registry(&self) -> &OperationRegistry<H> {
        &self.registry
    }

    /// Queue an object export operation.
    pub fn add_object_export_op<O>(&mut self, op: O) -> OpId
    where
        O: ObjectExportOp + 'static,
    {
        self.registry.add_object(op)
    }

    /// Queue a transform export operation writing into `target`.
    pub fn add_transform_export_op<T>(&mut self, op: T, target: H) -> usize
    where
        T: TransformExportOp<H> + 'static,
    {
        self.registry.add_transform(op, target)
    }

    /// Transform output targets in registration order.
    pub fn transform_targets(&self) -> impl Iterator<Item = &H> {
        self.registry.transform_targets()
    }

    /// Consume the task, returning the transform output targets.
    pub fn into_transform_targets(self) -> Vec<H> {
        self.registry.into_transform_targets()
    }

    /// Initial timeline: transform passes on the fixed cadence, and every
    /// object at its first export time.
    pub fn build_timeline(&self) -> Timeline {
        let mut timeline = Timeline::with_transform_passes(&self.config);
        let start = self.config.start_time();
        for (id, slot) in self.registry.objects.iter().enumerate() {
            let interval = slot.validity_interval(id, start);
            let first = first_export_time(interval, &self.config);
            tracing::trace!(op = id, first, "seeded object");
            timeline.schedule(first, id);
        }
        timeline
    }

    /// Execute every queued operation, batched per time.
    ///
    /// On error the session is left partially written. A cancelled session
    /// returns [`Error::Cancelled`] without running post-export callbacks.
    pub fn execute(&mut self, progress: &mut dyn ProgressReporter) -> Result<ExportSummary> {
        let config = self.config;
        let _span = tracing::info_span!(
            "anim_export",
            start = config.start_time(),
            end = config.end_time(),
            step = config.time_step(),
            animated = config.is_animated()
        )
        .entered();

        self.registry.reset();
        let mut timeline = self.build_timeline();
        let animated = config.is_animated();
        let num_objects = self.registry.num_objects();
        let num_transforms = self.registry.num_transforms();

        // Animated: progress per frame. Single frame: per object, then per transform.
        if animated {
            progress.set_total(timeline.len());
            progress.update_progress(0, true, FRAMES_PROGRESS_LABEL);
        } else {
            progress.set_total(num_objects);
            progress.update_progress(0, true, OBJECTS_PROGRESS_LABEL);
        }

        let mut summary = ExportSummary::default();
        let mut frame_progress = 0usize;

        while let Some((time, request)) = timeline.pop_next() {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    tracing::warn!(time, "export cancelled");
                    return Err(Error::Cancelled { time });
                }
            }
            tracing::debug!(
                time,
                objects = request.due_objects().len(),
                transform = request.needs_transform_pass(),
                "visiting time"
            );
            summary.visited_times.push(time);

            let due = request.due_objects();
            if !due.is_empty() {
                let next_intervals = match self.mode {
                    ExecutionMode::Sequential => {
                        write_objects(&mut self.registry.objects, due, time, &config, progress)?
                    }
                    ExecutionMode::ParallelPerTick => {
                        let next = write_objects_parallel(&mut self.registry.objects, due, time, &config)?;
                        if !animated {
                            for i in 0..next.len() {
                                progress.update_progress(i + 1, true, OBJECTS_PROGRESS_LABEL);
                            }
                        }
                        next
                    }
                };
                summary.object_writes += next_intervals.len();

                for (id, interval) in next_intervals {
                    match next_export_time(time, interval, &config) {
                        Some(next) => {
                            tracing::trace!(op = id, time, next, "rescheduled object");
                            self.registry.objects[id].first_frame = false;
                            timeline.schedule(next, id);
                        }
                        None => tracing::trace!(op = id, time, "object done"),
                    }
                }
            }

            if request.needs_transform_pass() {
                if !animated {
                    progress.set_total(num_transforms);
                }
                let export_time = ExportTime::new(time, config.ticks_per_frame(), config.time_code(time), false);
                for (i, slot) in self.registry.transforms.iter_mut().enumerate() {
                    slot.write(&export_time)?;
                    summary.transform_writes += 1;
                    if !animated {
                        progress.update_progress(i + 1, true, TRANSFORMS_PROGRESS_LABEL);
                    }
                }
                if animated {
                    progress.update_progress(frame_progress, true, FRAMES_PROGRESS_LABEL);
                    frame_progress += 1;
                }
            }
        }

        progress.set_total(num_objects);
        for (i, slot) in self.registry.objects.iter_mut().enumerate() {
            progress.update_progress(i, true, POST_EXPORT_PROGRESS_LABEL);
            slot.post_export()?;
            summary.finalized += 1;
        }

        tracing::info!(
            times = summary.visited_times.len(),
            object_writes = summary.object_writes,
            transform_writes = summary.transform_writes,
            "export complete"
        );
        Ok(summary)
    }
}

/// Write the due objects one by one; returns each object's validity one
/// step later, in registration order.
fn write_objects(
    objects: &mut [ObjectSlot],
    due: &[OpId],
    time: Tick,
    config: &TimeConfig,
    progress: &mut dyn ProgressReporter,
) -> Result<Vec<(OpId, Interval)>> {
    let time_code = config.time_code(time);
    let next_time = time.saturating_add(config.time_step());
    let mut next_intervals = Vec::with_capacity(due.len());
    for (i, &id) in due.iter().enumerate() {
        let slot = &mut objects[id];
        slot.write(&ExportTime::new(time, config.ticks_per_frame(), time_code, slot.first_frame))?;
        if !config.is_animated() {
            progress.update_progress(i + 1, true, OBJECTS_PROGRESS_LABEL);
        }
        next_intervals.push((id, slot.validity_interval(id, next_time)));
    }
    Ok(next_intervals)
}

/// Parallel variant of [`write_objects`]; progress is left to the caller.
fn write_objects_parallel(
    objects: &mut [ObjectSlot],
    due: &[OpId],
    time: Tick,
    config: &TimeConfig,
) -> Result<Vec<(OpId, Interval)>> {
    let time_code = config.time_code(time);
    let next_time = time.saturating_add(config.time_step());
    let ticks_per_frame = config.ticks_per_frame();
    due_slots(objects, due)
        .into_par_iter()
        .map(|(id, slot)| -> Result<(OpId, Interval)> {
            slot.write(&ExportTime::new(time, ticks_per_frame, time_code, slot.first_frame))?;
            Ok((id, slot.validity_interval(id, next_time)))
        })
        .collect()
}

/// Mutable borrows of the slots named by `due`, which must be sorted and
/// unique. Only the due slots are visited.
fn due_slots<'a, T>(mut slots: &'a mut [T], due: &[OpId]) -> Vec<(OpId, &'a mut T)> {
    let mut selected = Vec::with_capacity(due.len());
    let mut offset = 0;
    for &id in due {
        let rest = std::mem::take(&mut slots);
        let Some((slot, tail)) = rest.get_mut(id - offset..).and_then(|r| r.split_first_mut()) else {
            break;
        };
        selected.push((id, slot));
        slots = tail;
        offset = id + 1;
    }
    selected
}
