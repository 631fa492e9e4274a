#![allow(missing_docs, clippy::unwrap_used)]
//! Snapshot source driven through the reader and the full run.

use bridge_core::reader::read_boundary;
use bridge_core::{run_bridge, BoundaryMode, BridgeError, TrackingOrigin};
use bridge_dry_tests::{quick_prefs, RecordingDestination};
use bridge_runtime_fs::SnapshotSource;
use std::fs;

const ROOM: &str = r#"{
    "tracking_origin": "eye_level",
    "play_area": [[-1, 0, 0], [1, 0, 0], [1, 0, 2], [-1, 0, 2]],
    "outer": [[-2, 0, -1], [2, 0, -1], [2, 0, 3], [-2, 0, 3]]
}"#;

#[test]
fn snapshot_file_reads_like_a_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("room.json");
    fs::write(&path, ROOM).unwrap();

    let source = SnapshotSource::from_path(&path);
    let boundary = read_boundary(&source, TrackingOrigin::EyeLevel).unwrap();
    assert_eq!(boundary.play_area.len(), 4);
    assert_eq!(boundary.outer.len(), 4);
    assert_eq!(boundary.dimensions.to_array(), [2.0, 0.0, 2.0]);
}

#[test]
fn missing_snapshot_is_an_initialization_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = SnapshotSource::from_path(dir.path().join("absent.json"));
    let dest = RecordingDestination::new();
    let err = run_bridge(&source, &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap_err();
    assert!(matches!(err, BridgeError::InitializationFailure(_)));
    assert!(dest.calls().is_empty());
}

#[test]
fn malformed_snapshot_is_an_initialization_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    let err = read_boundary(&SnapshotSource::from_path(&path), TrackingOrigin::EyeLevel)
        .unwrap_err();
    assert!(matches!(err, BridgeError::InitializationFailure(_)));
}

#[test]
fn snapshot_run_commits_four_walls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("room.json");
    fs::write(&path, ROOM).unwrap();
    let dest = RecordingDestination::new();
    let report = run_bridge(&SnapshotSource::from_path(&path), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    assert_eq!(report.commit.quads_committed, 4);
    assert_eq!(report.origin.to_array(), [0.0, 0.0, 1.0]);
}
