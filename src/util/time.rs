//! Host time base.
//!
//! Scheduling happens on an integer tick axis. Frames are a derived,
//! fractional view of that axis given a ticks-per-frame rate.

/// Integer time unit in the host's native time base.
pub type Tick = i64;

/// Fractional frame number.
pub type Frame = f64;

/// Ticks per second in the host time base.
pub const TICKS_PER_SECOND: Tick = 4800;

/// Default frame rate (frames per second).
pub const DEFAULT_FRAME_RATE: Tick = 30;

/// Default ticks per frame (4800 / 30).
pub const DEFAULT_TICKS_PER_FRAME: Tick = TICKS_PER_SECOND / DEFAULT_FRAME_RATE;

/// Sentinel for the start of an unbounded interval.
pub const TIME_NEG_INFINITY: Tick = Tick::MIN;

/// Sentinel for the end of an unbounded interval.
pub const TIME_POS_INFINITY: Tick = Tick::MAX;

/// Convert a frame number to ticks (truncating toward zero).
#[inline]
pub fn frame_to_ticks(frame: Frame, ticks_per_frame: Tick) -> Tick {
    (frame * ticks_per_frame as Frame) as Tick
}

/// Convert ticks to a frame number.
#[inline]
pub fn ticks_to_frame(time: Tick, ticks_per_frame: Tick) -> Frame {
    time as Frame / ticks_per_frame as Frame
}
