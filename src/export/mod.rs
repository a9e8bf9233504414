//! Export scheduling.
//!
//! This module provides:
//! - [`OperationRegistry`] - Queued object and transform operations
//! - [`Timeline`] - Ordered `time -> request` map and the sampling policy
//! - [`AnimExportTask`] - Execution loop and post-export pass
//! - [`ProgressReporter`] - Progress sink driven by the execution loop
//! - [`CancellationToken`] - Cooperative cancellation between time points

mod cancel;
mod progress;
mod registry;
mod task;
mod timeline;

pub use cancel::CancellationToken;
pub use progress::{
    LogProgress, NoProgress, ProgressReporter, FRAMES_PROGRESS_LABEL, OBJECTS_PROGRESS_LABEL,
    POST_EXPORT_PROGRESS_LABEL, TRANSFORMS_PROGRESS_LABEL,
};
pub use registry::{OpId, OperationRegistry};
pub use task::{AnimExportTask, ExecutionMode, ExportSummary};
pub use timeline::{first_export_time, next_export_time, ExportRequest, Timeline};
