//! Integration tests for scene descriptions and export planning.

use std::io::Write;

use anim_export::export::{ExecutionMode, NoProgress};
use anim_export::scene::{plan_scene, ExportEvent, SceneDesc};
use anim_export::Error;
use tempfile::NamedTempFile;

const SCENE: &str = r#"{
    "time": { "start_frame": 0, "end_frame": 10, "samples_per_frame": 1 },
    "objects": [
        { "name": "door", "keys": [0, 3], "interpolation": "step" },
        { "name": "ball", "keys": [2, 5], "interpolation": "linear" },
        { "name": "ground" }
    ],
    "transforms": ["door", "ball"]
}"#;

fn write_scene(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(text.as_bytes()).expect("Failed to write scene");
    file
}

#[test]
fn test_load_and_plan() {
    let file = write_scene(SCENE);
    let desc = SceneDesc::load(file.path()).expect("Failed to load scene");
    assert_eq!(desc.objects.len(), 3);

    let plan = plan_scene(&desc, &mut NoProgress).expect("Failed to plan");

    assert_eq!(plan.object_times("door"), vec![479, 480]);
    // Linear keys: every step between the first and last key.
    assert_eq!(plan.object_times("ball"), vec![320, 480, 640, 800]);
    assert_eq!(plan.object_times("ground"), vec![0]);

    assert_eq!(plan.tracks.len(), 2);
    assert_eq!(plan.tracks[0].name, "door");
    assert_eq!(plan.tracks[1].times(), (0..=10).map(|f: anim_export::Tick| f * 160).collect::<Vec<_>>());

    assert_eq!(plan.summary.finalized, 3);
    assert_eq!(plan.summary.object_writes, 7);
    assert_eq!(plan.summary.transform_writes, 22);
    assert!(plan.summary.visited_times.contains(&479));
}

#[test]
fn test_first_frame_flags_in_plan() {
    let desc = SceneDesc::from_json(SCENE).expect("Failed to parse scene");
    let plan = plan_scene(&desc, &mut NoProgress).expect("Failed to plan");

    let door: Vec<bool> = plan
        .events
        .iter()
        .filter_map(|e| match e {
            ExportEvent::ObjectWrite { object, first_frame, .. } if object == "door" => Some(*first_frame),
            _ => None,
        })
        .collect();
    assert_eq!(door, vec![true, false]);

    let posts: Vec<&str> = plan
        .events
        .iter()
        .filter(|e| matches!(e, ExportEvent::PostExport { .. }))
        .map(|e| e.object())
        .collect();
    assert_eq!(posts, vec!["door", "ball", "ground"]);
}

#[test]
fn test_parallel_plan_matches_sequential() {
    let sequential = SceneDesc::from_json(SCENE).expect("Failed to parse scene");
    let mut parallel = sequential.clone();
    parallel.time.mode = ExecutionMode::ParallelPerTick;

    let a = plan_scene(&sequential, &mut NoProgress).expect("Failed to plan");
    let b = plan_scene(&parallel, &mut NoProgress).expect("Failed to plan");

    assert_eq!(a.summary, b.summary);
    assert_eq!(a.tracks, b.tracks);
    for name in ["door", "ball", "ground"] {
        assert_eq!(a.object_times(name), b.object_times(name));
    }
}

#[test]
fn test_single_frame_scene() {
    let desc = SceneDesc::from_json(
        r#"{ "time": { "start_frame": 4, "end_frame": 4 }, "objects": [{ "name": "box", "keys": [0, 8] }], "transforms": ["box"] }"#,
    )
    .expect("Failed to parse scene");
    let plan = plan_scene(&desc, &mut NoProgress).expect("Failed to plan");

    assert!(!plan.config.is_animated());
    assert_eq!(plan.summary.visited_times, vec![640]);
    assert_eq!(plan.object_times("box"), vec![640]);
    assert!(plan.tracks[0].samples.iter().all(|(_, code)| code.is_default()));
}

#[test]
fn test_plan_json_roundtrip() {
    let desc = SceneDesc::from_json(SCENE).expect("Failed to parse scene");
    let plan = plan_scene(&desc, &mut NoProgress).expect("Failed to plan");
    let json = serde_json::to_string(&plan).expect("Failed to serialize plan");
    assert!(json.contains("\"kind\":\"object_write\""));
    let back: anim_export::scene::ScenePlan = serde_json::from_str(&json).expect("Failed to parse plan");
    assert_eq!(back, plan);
}

#[test]
fn test_missing_file() {
    let err = SceneDesc::load("/nonexistent/scene.json").unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn test_invalid_scenes() {
    let bad_json = write_scene("{ not json");
    assert!(matches!(SceneDesc::load(bad_json.path()), Err(Error::Json(_))));

    let desc = SceneDesc::from_json(r#"{ "time": { "start_frame": 5, "end_frame": 1 } }"#)
        .expect("range is checked when planning");
    assert!(matches!(
        plan_scene(&desc, &mut NoProgress),
        Err(Error::InvalidTimeRange { .. })
    ));

    let desc = SceneDesc::from_json(r#"{ "time": { "end_frame": 1, "samples_per_frame": -2 } }"#)
        .expect("rate is checked when planning");
    assert!(matches!(
        plan_scene(&desc, &mut NoProgress),
        Err(Error::InvalidSamplesPerFrame(_))
    ));
}
