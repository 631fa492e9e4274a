#![allow(missing_docs, clippy::unwrap_used)]
//! Store-backed destination driven by the real pipeline.

use bridge_app_core::config::ConfigStore;
use bridge_config_fs::FsConfigStore;
use bridge_core::{
    commit_boundary, plan_boundary, run_bridge, ApplicationType, BoundaryMode, BridgeError,
    CalibrationState, CommitStep, ConfigTarget, DestinationRuntime, Mat34,
    PlayAreaSize, SettingsOutcome, COLLISION_BOUNDS_ALPHA_KEY, COLLISION_BOUNDS_SECTION,
};
use bridge_dry_tests::{quick_prefs, room_source, InMemoryConfigStore};
use bridge_runtime_fs::{StoreDestination, CHAPERONE_KEY, SETTINGS_KEY};
use std::collections::HashMap;

#[test]
fn run_commits_document_and_settings() {
    let store = InMemoryConfigStore::new();
    let dest = StoreDestination::new(store.clone());
    let report = run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    assert_eq!(report.commit.calibration, CalibrationState::Warning);
    assert_eq!(report.commit.previous_quads, Some(0));

    let doc = dest.live_document().unwrap().unwrap();
    assert_eq!(doc.collision_bounds.len(), 4);
    assert_eq!(doc.play_area, PlayAreaSize { width: 2.0, depth: 2.0 });
    assert_eq!(doc.standing_pose.translation_part().to_array(), [0.0, 0.0, 1.0]);
    assert_eq!(
        dest.settings()
            .unwrap()
            .get_i32(COLLISION_BOUNDS_SECTION, COLLISION_BOUNDS_ALPHA_KEY),
        Some(0)
    );
    assert!(store.contains_key(CHAPERONE_KEY));
    assert!(store.contains_key(SETTINGS_KEY));
}

#[test]
fn second_run_sees_previous_bounds_and_clear_empties_them() {
    let store = InMemoryConfigStore::new();
    let dest = StoreDestination::new(store.clone());
    run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();

    let report = run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::ClearBoundary).unwrap();
    assert_eq!(report.commit.calibration, CalibrationState::Ok);
    assert_eq!(report.commit.previous_quads, Some(4));
    let doc = dest.live_document().unwrap().unwrap();
    assert!(doc.collision_bounds.is_empty());
}

#[test]
fn staging_before_calibration_query_is_refused() {
    let dest = StoreDestination::new(InMemoryConfigStore::new());
    dest.initialize(ApplicationType::Scene).unwrap();
    assert!(dest.revert_working_copy().is_err());
    assert!(dest.set_working_standing_pose(&Mat34::identity()).is_err());
}

#[test]
fn failed_store_write_fails_commit_step_and_keeps_old_document() {
    let store = InMemoryConfigStore::new();
    let dest = StoreDestination::new(store.clone());
    run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    let before = store.peek(CHAPERONE_KEY);

    store.set_fail_on_save(true);
    let err = run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::ClearBoundary).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::CommitStepFailure {
            step: CommitStep::Commit,
            ..
        }
    ));
    assert_eq!(store.peek(CHAPERONE_KEY), before);
}

#[test]
fn commit_without_revert_is_refused_by_destination() {
    let dest = StoreDestination::new(InMemoryConfigStore::new());
    dest.initialize(ApplicationType::Scene).unwrap();
    let _ = dest.calibration_state();
    assert!(dest.commit_working_copy(ConfigTarget::Live).is_err());
}

#[test]
fn filesystem_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    let dest = StoreDestination::new(store.clone());
    run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();

    let raw = store.load_raw(CHAPERONE_KEY).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["collision_bounds"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["standing_pose"][2][3], 1.0);

    // Re-open through a fresh adapter: the pipeline must see the committed bounds.
    let reopened = StoreDestination::new(FsConfigStore::at(dir.path()).unwrap());
    let plan = plan_boundary(&room_source(), &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    reopened.initialize(ApplicationType::Scene).unwrap();
    let report = commit_boundary(&reopened, &plan).unwrap();
    assert_eq!(report.previous_quads, Some(4));
}

#[test]
fn run_saves_chaperone_then_settings_once_each() {
    let store = InMemoryConfigStore::new();
    let dest = StoreDestination::new(store.clone());
    run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    assert_eq!(store.save_count(), 2);
}

#[test]
fn malformed_live_document_reports_error_calibration_and_is_replaced() {
    let mut data = HashMap::new();
    data.insert(CHAPERONE_KEY.to_string(), b"{ truncated".to_vec());
    let store = InMemoryConfigStore::with_data(data);
    let dest = StoreDestination::new(store.clone());

    let report = run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    assert_eq!(report.commit.calibration, CalibrationState::Error);
    assert_eq!(report.commit.previous_quads, Some(0));
    assert_eq!(dest.live_document().unwrap().unwrap().collision_bounds.len(), 4);
}

#[test]
fn unreadable_settings_fail_only_the_settings_step() {
    let store = InMemoryConfigStore::new();
    store.set_fail_on_load(true);
    let dest = StoreDestination::new(store.clone());

    let report = run_bridge(&room_source(), &dest, &quick_prefs(), BoundaryMode::WriteBoundary).unwrap();
    assert_eq!(report.commit.quads_committed, 4);
    assert!(matches!(report.settings, SettingsOutcome::Failed(_)));
    assert!(store.contains_key(CHAPERONE_KEY));
    assert!(!store.contains_key(SETTINGS_KEY));
}
