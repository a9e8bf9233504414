//! Scene descriptions and recording operations for export planning.
//!
//! Lets the scheduler run without a host application: objects are described
//! by key frames, writes are recorded instead of authored, and the resulting
//! [`ScenePlan`] lists what would be written and when.

mod desc;
mod keyed;
mod log;

pub use desc::{plan_scene, ObjectDesc, SceneDesc, ScenePlan, TimeSettings};
pub use keyed::{keyed_validity, Interpolation, KeyedObjectOp, TrackTransformOp, TransformTrack};
pub use log::{ExportEvent, ExportLog};
