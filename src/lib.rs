//! # anim-export
//!
//! Sparse time-sample scheduler for incremental animated scene export.
//!
//! Exporters register one operation per object (with a validity-interval
//! query) and one per node transform. The scheduler works out the minimal
//! ordered set of host times to visit: transforms on a fixed cadence,
//! objects only where their data can change. Everything due at one time is
//! written together so the host's evaluation cache for that time is reused.
//!
//! ## Modules
//!
//! - [`util`] - Time base and errors
//! - [`core`] - Time configuration, intervals, operation traits
//! - [`export`] - Timeline, execution loop, progress, cancellation
//! - [`scene`] - JSON scene descriptions and recording operations for planning
//!
//! ## Example
//!
//! ```
//! use anim_export::prelude::*;
//!
//! let config = TimeConfig::new(0, 10, 5)?;
//! let mut task: AnimExportTask = AnimExportTask::new(config);
//! task.add_object_export_op(FnObjectOp::new(
//!     |_t: Tick| Interval::new(0, 3),
//!     |time: &ExportTime| -> Result<()> {
//!         println!("write at {}", time.time());
//!         Ok(())
//!     },
//!     || -> Result<()> { Ok(()) },
//! ));
//! let summary = task.execute(&mut NoProgress)?;
//! assert_eq!(summary.visited_times, vec![0, 3, 5, 10]);
//! # Ok::<(), anim_export::Error>(())
//! ```

pub mod util;
pub mod core;
pub mod export;
pub mod scene;

// Re-export commonly used types
pub use util::{Error, Result, Tick};
pub use export::{AnimExportTask, ExportSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, Tick, Frame, TIME_NEG_INFINITY, TIME_POS_INFINITY};
    pub use crate::core::{
        TimeConfig, TimeCode, Interval, ExportTime, ObjectExportOp, TransformExportOp, FnObjectOp,
    };
    pub use crate::export::{
        AnimExportTask, ExecutionMode, ExportSummary, CancellationToken,
        ProgressReporter, NoProgress, LogProgress,
    };
}
