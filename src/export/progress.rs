//! Progress reporting.
//!
//! Exports can take a long time, so the scheduler drives an injected
//! reporter. What a reporter does with the numbers (progress bar, log line,
//! nothing) is up to the caller.

/// Label used while writing time samples of an animated session.
pub const FRAMES_PROGRESS_LABEL: &str = "Exporting frames";
/// Label used while writing objects of a single-frame session.
pub const OBJECTS_PROGRESS_LABEL: &str = "Exporting objects";
/// Label used while writing transforms of a single-frame session.
pub const TRANSFORMS_PROGRESS_LABEL: &str = "Exporting transforms";
/// Label used during the post-export pass.
pub const POST_EXPORT_PROGRESS_LABEL: &str = "Finalizing objects";

/// Sink for export progress.
pub trait ProgressReporter {
    /// Set the number of steps of the current stage.
    fn set_total(&mut self, total: usize);

    /// Report the current step of the current stage.
    fn update_progress(&mut self, current: usize, show_percent: bool, label: &str);
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &mut P {
    fn set_total(&mut self, total: usize) {
        (**self).set_total(total)
    }

    fn update_progress(&mut self, current: usize, show_percent: bool, label: &str) {
        (**self).update_progress(current, show_percent, label)
    }
}

/// Reporter that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn set_total(&mut self, _total: usize) {}

    fn update_progress(&mut self, _current: usize, _show_percent: bool, _label: &str) {}
}

/// Reporter that emits a `tracing` event every time the percentage crosses
/// a multiple of `step_percent`.
#[derive(Clone, Debug)]
pub struct LogProgress {
    total: usize,
    step_percent: usize,
    last_bucket: Option<usize>,
}

impl LogProgress {
    pub fn new(step_percent: usize) -> Self {
        Self {
            total: 0,
            step_percent: step_percent.clamp(1, 100),
            last_bucket: None,
        }
    }

    /// Percentage of `current` in the current stage (0 when the total is unknown).
    pub fn percent(&self, current: usize) -> usize {
        if self.total == 0 {
            0
        } else {
            (current.min(self.total) * 100) / self.total
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressReporter for LogProgress {
    fn set_total(&mut self, total: usize) {
        self.total = total;
        self.last_bucket = None;
    }

    fn update_progress(&mut self, current: usize, show_percent: bool, label: &str) {
        let percent = self.percent(current);
        let bucket = percent / self.step_percent;
        if self.last_bucket == Some(bucket) {
            return;
        }
        self.last_bucket = Some(bucket);
        if show_percent {
            tracing::info!("{label}: {percent}% ({current}/{})", self.total);
        } else {
            tracing::info!("{label}: {current}/{}", self.total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        let mut p = LogProgress::default();
        assert_eq!(p.percent(5), 0);
        p.set_total(4);
        assert_eq!(p.percent(1), 25);
        assert_eq!(p.percent(4), 100);
        assert_eq!(p.percent(9), 100);
    }

    #[test]
    fn test_bucket_dedup() {
        let mut p = LogProgress::new(50);
        p.set_total(10);
        p.update_progress(1, true, FRAMES_PROGRESS_LABEL);
        assert_eq!(p.last_bucket, Some(0));
        p.update_progress(6, true, FRAMES_PROGRESS_LABEL);
        assert_eq!(p.last_bucket, Some(1));
        p.set_total(3);
        assert_eq!(p.last_bucket, None);
    }
}
