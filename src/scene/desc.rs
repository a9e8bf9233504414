//! JSON scene description for export planning.
//!
//! ```json
//! {
//!   "time": { "start_frame": 0, "end_frame": 10, "samples_per_frame": 1 },
//!   "objects": [
//!     { "name": "box", "keys": [0, 3], "interpolation": "step" },
//!     { "name": "ground" }
//!   ],
//!   "transforms": ["box", "ground"]
//! }
//! ```
//!
//! Keys are given in frames and converted to ticks with `ticks_per_frame`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::keyed::{Interpolation, KeyedObjectOp, TrackTransformOp, TransformTrack};
use super::log::{ExportEvent, ExportLog};
use crate::core::TimeConfig;
use crate::export::{AnimExportTask, ExecutionMode, ExportSummary, ProgressReporter};
use crate::util::{frame_to_ticks, Error, Frame, Result, Tick, DEFAULT_TICKS_PER_FRAME};

/// Export range settings, in frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    pub start_frame: Frame,
    pub end_frame: Frame,
    pub samples_per_frame: f64,
    pub ticks_per_frame: Tick,
    pub mode: ExecutionMode,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            start_frame: 0.0,
            end_frame: 0.0,
            samples_per_frame: 1.0,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
            mode: ExecutionMode::Sequential,
        }
    }
}

impl TimeSettings {
    pub fn to_config(&self) -> Result<TimeConfig> {
        TimeConfig::from_frames_with_rate(
            self.start_frame,
            self.end_frame,
            self.samples_per_frame,
            self.ticks_per_frame,
        )
    }
}

/// One keyed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDesc {
    pub name: String,
    #[serde(default)]
    pub keys: Vec<Frame>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

/// Scene to plan an export for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub time: TimeSettings,
    pub objects: Vec<ObjectDesc>,
    /// Names of nodes whose transforms are sampled.
    pub transforms: Vec<String>,
}

impl SceneDesc {
    /// Load and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let desc: Self = serde_json::from_str(text)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Check names are non-empty and unique per category.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for obj in &self.objects {
            if obj.name.is_empty() {
                return Err(Error::invalid_scene("object with empty name"));
            }
            if !seen.insert(obj.name.as_str()) {
                return Err(Error::invalid_scene(format!("duplicate object '{}'", obj.name)));
            }
            if obj.keys.iter().any(|k| !k.is_finite()) {
                return Err(Error::invalid_scene(format!("non-finite key on '{}'", obj.name)));
            }
        }
        let mut seen = HashSet::new();
        for name in &self.transforms {
            if name.is_empty() {
                return Err(Error::invalid_scene("transform with empty name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::invalid_scene(format!("duplicate transform '{}'", name)));
            }
        }
        Ok(())
    }

    /// Build a task with one keyed operation per object and one track per
    /// transform, all recording into `log`.
    pub fn build_task(&self, log: &ExportLog) -> Result<AnimExportTask<TransformTrack>> {
        let config = self.time.to_config()?;
        let tpf = config.ticks_per_frame();
        let mut task = AnimExportTask::new(config).with_mode(self.time.mode);
        for obj in &self.objects {
            let keys = obj.keys.iter().map(|&k| frame_to_ticks(k, tpf)).collect();
            task.add_object_export_op(KeyedObjectOp::new(&obj.name, keys, obj.interpolation, log.clone()));
        }
        for name in &self.transforms {
            task.add_transform_export_op(TrackTransformOp::new(log.clone()), TransformTrack::new(name));
        }
        Ok(task)
    }
}

/// Result of planning a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub config: TimeConfig,
    pub summary: ExportSummary,
    pub events: Vec<ExportEvent>,
    pub tracks: Vec<TransformTrack>,
}

impl ScenePlan {
    /// Ticks at which `object` was written as an object.
    pub fn object_times(&self, object: &str) -> Vec<Tick> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ExportEvent::ObjectWrite { object: o, time, .. } if o == object => Some(*time),
                _ => None,
            })
            .collect()
    }
}

/// Run the export of `desc` against recording operations.
pub fn plan_scene(desc: &SceneDesc, progress: &mut dyn ProgressReporter) -> Result<ScenePlan> {
    let log = ExportLog::new();
    let mut task = desc.build_task(&log)?;
    let config = *task.config();
    let summary = task.execute(progress)?;
    Ok(ScenePlan {
        config,
        summary,
        events: log.events(),
        tracks: task.into_transform_targets(),
    })
}
