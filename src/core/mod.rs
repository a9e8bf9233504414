//! Core layer - time model and operation traits.
//!
//! This module provides:
//! - [`TimeConfig`] - Export range and sampling cadence
//! - [`Interval`] - Validity intervals reported by operations
//! - [`ExportTime`] / [`TimeCode`] - Time sample handed to write callbacks
//! - [`ObjectExportOp`] / [`TransformExportOp`] - Operation interfaces

mod time_config;
mod interval;
mod export_time;
mod traits;

pub use time_config::{TimeConfig, TimeCode, SampleTimes};
pub use interval::Interval;
pub use export_time::ExportTime;
pub use traits::{ObjectExportOp, TransformExportOp, FnObjectOp};
