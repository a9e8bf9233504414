//! Export time passed to write callbacks.

use serde::{Deserialize, Serialize};

use super::TimeCode;
use crate::util::{ticks_to_frame, Frame, Tick};

/// A single time sample to write: the host tick, the matching target time
/// code, and whether this is the first sample written for an object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportTime {
    time: Tick,
    frame: Frame,
    time_code: TimeCode,
    first_frame: bool,
}

impl ExportTime {
    pub fn new(time: Tick, ticks_per_frame: Tick, time_code: TimeCode, first_frame: bool) -> Self {
        Self {
            time,
            frame: ticks_to_frame(time, ticks_per_frame),
            time_code,
            first_frame,
        }
    }

    /// Host time in ticks.
    #[inline]
    pub fn time(&self) -> Tick {
        self.time
    }

    /// Host time as a frame number.
    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Target time code.
    #[inline]
    pub fn time_code(&self) -> TimeCode {
        self.time_code
    }

    /// True for the first sample written for an object.
    #[inline]
    pub fn is_first_frame(&self) -> bool {
        self.first_frame
    }
}
