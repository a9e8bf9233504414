//! Progress reporting contract of the export task.

use anim_export::export::{
    FRAMES_PROGRESS_LABEL, OBJECTS_PROGRESS_LABEL, POST_EXPORT_PROGRESS_LABEL, TRANSFORMS_PROGRESS_LABEL,
};
use anim_export::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Report {
    Total(usize),
    Update(usize, String),
}

#[derive(Default)]
struct RecordingProgress {
    reports: Vec<Report>,
}

impl ProgressReporter for RecordingProgress {
    fn set_total(&mut self, total: usize) {
        self.reports.push(Report::Total(total));
    }

    fn update_progress(&mut self, current: usize, show_percent: bool, label: &str) {
        assert!(show_percent);
        self.reports.push(Report::Update(current, label.to_string()));
    }
}

fn update(current: usize, label: &str) -> Report {
    Report::Update(current, label.to_string())
}

fn noop_object(validity: fn(Tick) -> Interval) -> impl ObjectExportOp {
    FnObjectOp::new(
        validity,
        |_time: &ExportTime| -> Result<()> { Ok(()) },
        || -> Result<()> { Ok(()) },
    )
}

fn noop_transform(_time: &ExportTime, _target: &mut ()) -> Result<()> {
    Ok(())
}

#[test]
fn test_animated_progress_per_frame() {
    let mut task: AnimExportTask = AnimExportTask::new(TimeConfig::new(0, 10, 5).unwrap());
    task.add_object_export_op(noop_object(Interval::instant));
    task.add_transform_export_op(noop_transform, ());

    let mut progress = RecordingProgress::default();
    task.execute(&mut progress).expect("export failed");

    assert_eq!(
        progress.reports,
        vec![
            Report::Total(3),
            update(0, FRAMES_PROGRESS_LABEL),
            // One report per transform pass, counting frames already done.
            update(0, FRAMES_PROGRESS_LABEL),
            update(1, FRAMES_PROGRESS_LABEL),
            update(2, FRAMES_PROGRESS_LABEL),
            Report::Total(1),
            update(0, POST_EXPORT_PROGRESS_LABEL),
        ]
    );
}

#[test]
fn test_animated_total_counts_seeded_times() {
    let mut task: AnimExportTask = AnimExportTask::new(TimeConfig::new(0, 10, 5).unwrap());
    // Seeded off cadence, at its edge sample.
    task.add_object_export_op(noop_object(|_| Interval::new(0, 3)));

    let mut progress = RecordingProgress::default();
    task.execute(&mut progress).expect("export failed");

    assert_eq!(progress.reports.first(), Some(&Report::Total(4)));
    // Only transform passes advance the frame counter.
    let frame_updates = progress
        .reports
        .iter()
        .filter(|r| matches!(r, Report::Update(_, l) if l == FRAMES_PROGRESS_LABEL))
        .count();
    assert_eq!(frame_updates, 4);
}

#[test]
fn test_single_frame_progress_per_operation() {
    let mut task: AnimExportTask = AnimExportTask::new(TimeConfig::single_frame(0));
    task.add_object_export_op(noop_object(Interval::instant));
    task.add_object_export_op(noop_object(|_| Interval::FOREVER));
    for _ in 0..3 {
        task.add_transform_export_op(noop_transform, ());
    }

    let mut progress = RecordingProgress::default();
    task.execute(&mut progress).expect("export failed");

    assert_eq!(
        progress.reports,
        vec![
            Report::Total(2),
            update(0, OBJECTS_PROGRESS_LABEL),
            update(1, OBJECTS_PROGRESS_LABEL),
            update(2, OBJECTS_PROGRESS_LABEL),
            Report::Total(3),
            update(1, TRANSFORMS_PROGRESS_LABEL),
            update(2, TRANSFORMS_PROGRESS_LABEL),
            update(3, TRANSFORMS_PROGRESS_LABEL),
            Report::Total(2),
            update(0, POST_EXPORT_PROGRESS_LABEL),
            update(1, POST_EXPORT_PROGRESS_LABEL),
        ]
    );
}

#[test]
fn test_single_frame_parallel_progress_matches() {
    let run = |mode: ExecutionMode| {
        let mut task: AnimExportTask = AnimExportTask::new(TimeConfig::single_frame(0)).with_mode(mode);
        for _ in 0..5 {
            task.add_object_export_op(noop_object(Interval::instant));
        }
        let mut progress = RecordingProgress::default();
        task.execute(&mut progress).expect("export failed");
        progress.reports
    };
    assert_eq!(run(ExecutionMode::Sequential), run(ExecutionMode::ParallelPerTick));
}

#[test]
fn test_log_progress_accepts_updates() {
    let mut task: AnimExportTask = AnimExportTask::new(TimeConfig::new(0, 1000, 10).unwrap());
    task.add_object_export_op(noop_object(Interval::instant));
    let mut progress = LogProgress::new(25);
    let summary = task.execute(&mut progress).expect("export failed");
    assert_eq!(summary.visited_times.len(), 101);
    assert_eq!(progress.percent(101), 100);
}
