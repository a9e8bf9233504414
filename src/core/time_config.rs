//! Time configuration for an export session.
//!
//! The session samples `[start_time, end_time]` on a fixed cadence of
//! `time_step` ticks. The last sample is always `end_time`, even when it is
//! not a whole number of steps away from `start_time`.

use serde::{Deserialize, Serialize};

use crate::util::{
    frame_to_ticks, ticks_to_frame, Error, Frame, Result, Tick, DEFAULT_TICKS_PER_FRAME,
};

/// Target time code handed to write callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimeCode {
    /// Time-less value, used for single-frame exports.
    Default,
    /// Value at the given frame.
    Frame(Frame),
}

impl TimeCode {
    /// Check if this is the time-less code.
    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Frame number, if any.
    #[inline]
    pub fn frame(&self) -> Option<Frame> {
        match self {
            Self::Default => None,
            Self::Frame(f) => Some(*f),
        }
    }
}

/// Export range and sampling rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeConfig")]
pub struct TimeConfig {
    start_time: Tick,
    end_time: Tick,
    time_step: Tick,
    animated: bool,
    ticks_per_frame: Tick,
}

#[derive(Deserialize)]
struct RawTimeConfig {
    start_time: Tick,
    end_time: Tick,
    time_step: Tick,
    animated: Option<bool>,
    ticks_per_frame: Option<Tick>,
}

impl TryFrom<RawTimeConfig> for TimeConfig {
    type Error = Error;

    fn try_from(raw: RawTimeConfig) -> Result<Self> {
        let mut config = Self::new(raw.start_time, raw.end_time, raw.time_step)?;
        if let Some(tpf) = raw.ticks_per_frame {
            config = config.with_ticks_per_frame(tpf)?;
        }
        if let Some(animated) = raw.animated {
            config = config.with_animated(animated);
        }
        Ok(config)
    }
}

impl TimeConfig {
    /// Create a config from a tick range and step.
    ///
    /// The session is animated whenever the range is not a single tick.
    pub fn new(start_time: Tick, end_time: Tick, time_step: Tick) -> Result<Self> {
        if start_time > end_time {
            return Err(Error::InvalidTimeRange { start: start_time, end: end_time });
        }
        if time_step <= 0 {
            return Err(Error::InvalidTimeStep(time_step));
        }
        Ok(Self {
            start_time,
            end_time,
            time_step,
            animated: start_time != end_time,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
        })
    }

    /// Single, non-animated sample at `time`.
    pub fn single_frame(time: Tick) -> Self {
        Self {
            start_time: time,
            end_time: time,
            time_step: DEFAULT_TICKS_PER_FRAME,
            animated: false,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
        }
    }

    /// Create a config from a frame range at the default frame rate.
    pub fn from_frames(start_frame: Frame, end_frame: Frame, samples_per_frame: f64) -> Result<Self> {
        Self::from_frames_with_rate(start_frame, end_frame, samples_per_frame, DEFAULT_TICKS_PER_FRAME)
    }

    /// Create a config from a frame range.
    ///
    /// The step is `ticks_per_frame / samples_per_frame`, truncated to whole ticks.
    pub fn from_frames_with_rate(
        start_frame: Frame,
        end_frame: Frame,
        samples_per_frame: f64,
        ticks_per_frame: Tick,
    ) -> Result<Self> {
        if ticks_per_frame <= 0 {
            return Err(Error::InvalidTicksPerFrame(ticks_per_frame));
        }
        if !samples_per_frame.is_finite() || samples_per_frame <= 0.0 {
            return Err(Error::InvalidSamplesPerFrame(samples_per_frame));
        }
        let time_step = (ticks_per_frame as f64 / samples_per_frame) as Tick;
        let config = Self::new(
            frame_to_ticks(start_frame, ticks_per_frame),
            frame_to_ticks(end_frame, ticks_per_frame),
            time_step,
        )?;
        Ok(Self {
            animated: start_frame != end_frame,
            ticks_per_frame,
            ..config
        })
    }

    /// Override the animated flag.
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Override the frame rate used for time codes.
    pub fn with_ticks_per_frame(mut self, ticks_per_frame: Tick) -> Result<Self> {
        if ticks_per_frame <= 0 {
            return Err(Error::InvalidTicksPerFrame(ticks_per_frame));
        }
        self.ticks_per_frame = ticks_per_frame;
        Ok(self)
    }

    #[inline]
    pub fn start_time(&self) -> Tick {
        self.start_time
    }

    #[inline]
    pub fn end_time(&self) -> Tick {
        self.end_time
    }

    #[inline]
    pub fn time_step(&self) -> Tick {
        self.time_step
    }

    #[inline]
    pub fn ticks_per_frame(&self) -> Tick {
        self.ticks_per_frame
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn start_frame(&self) -> Frame {
        ticks_to_frame(self.start_time, self.ticks_per_frame)
    }

    pub fn end_frame(&self) -> Frame {
        ticks_to_frame(self.end_time, self.ticks_per_frame)
    }

    /// Target time code for a tick: its frame when animated, otherwise
    /// [`TimeCode::Default`].
    pub fn time_code(&self, time: Tick) -> TimeCode {
        if self.animated {
            TimeCode::Frame(ticks_to_frame(time, self.ticks_per_frame))
        } else {
            TimeCode::Default
        }
    }

    /// Fixed-cadence sample ticks, ending exactly at `end_time`.
    pub fn sample_times(&self) -> SampleTimes {
        SampleTimes {
            next: Some(self.start_time),
            end: self.end_time,
            step: self.time_step,
        }
    }

    /// Number of fixed-cadence samples.
    pub fn num_samples(&self) -> usize {
        let span = (self.end_time as i128 - self.start_time as i128) as u128;
        let step = self.time_step as u128;
        (span.div_ceil(step) + 1) as usize
    }
}

/// Iterator over the fixed-cadence sample ticks of a [`TimeConfig`].
#[derive(Clone, Debug)]
pub struct SampleTimes {
    next: Option<Tick>,
    end: Tick,
    step: Tick,
}

impl Iterator for SampleTimes {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let current = self.next?;
        self.next = if current >= self.end {
            None
        } else {
            Some(current.saturating_add(self.step).min(self.end))
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_times_on_cadence() {
        let cfg = TimeConfig::new(0, 10, 5).unwrap();
        assert_eq!(cfg.sample_times().collect::<Vec<_>>(), vec![0, 5, 10]);
        assert_eq!(cfg.num_samples(), 3);
    }

    #[test]
    fn test_sample_times_off_cadence() {
        let cfg = TimeConfig::new(0, 11, 5).unwrap();
        assert_eq!(cfg.sample_times().collect::<Vec<_>>(), vec![0, 5, 10, 11]);
        assert_eq!(cfg.num_samples(), 4);
    }

    #[test]
    fn test_single_tick() {
        let cfg = TimeConfig::new(7, 7, 3).unwrap();
        assert_eq!(cfg.sample_times().collect::<Vec<_>>(), vec![7]);
        assert_eq!(cfg.num_samples(), 1);
        assert!(!cfg.is_animated());
        assert_eq!(cfg.time_code(7), TimeCode::Default);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            TimeConfig::new(10, 0, 1),
            Err(Error::InvalidTimeRange { start: 10, end: 0 })
        ));
        assert!(matches!(TimeConfig::new(0, 10, 0), Err(Error::InvalidTimeStep(0))));
        assert!(matches!(
            TimeConfig::from_frames(0.0, 10.0, 0.0),
            Err(Error::InvalidSamplesPerFrame(_))
        ));
        assert!(matches!(
            TimeConfig::from_frames(0.0, 10.0, f64::NAN),
            Err(Error::InvalidSamplesPerFrame(_))
        ));
        // 160 ticks cannot be split into 1000 whole-tick steps.
        assert!(matches!(
            TimeConfig::from_frames(0.0, 10.0, 1000.0),
            Err(Error::InvalidTimeStep(0))
        ));
    }

    #[test]
    fn test_from_frames() {
        let cfg = TimeConfig::from_frames(0.0, 10.0, 2.0).unwrap();
        assert_eq!(cfg.start_time(), 0);
        assert_eq!(cfg.end_time(), 1600);
        assert_eq!(cfg.time_step(), 80);
        assert!(cfg.is_animated());
        assert_eq!(cfg.time_code(800), TimeCode::Frame(5.0));
        assert!((cfg.end_frame() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_validates() {
        let cfg: TimeConfig =
            serde_json::from_str(r#"{"start_time":0,"end_time":320,"time_step":160}"#).unwrap();
        assert_eq!(cfg.num_samples(), 3);
        assert!(cfg.is_animated());

        let bad = serde_json::from_str::<TimeConfig>(
            r#"{"start_time":0,"end_time":320,"time_step":-1}"#,
        );
        assert!(bad.is_err());
    }
}
