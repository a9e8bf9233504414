//! Utility types and functions.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Tick`] / [`Frame`] - Host time base and conversions
//! - [`Error`] / [`Result`] - Error handling

mod error;
mod time;

pub use error::*;
pub use time::*;
