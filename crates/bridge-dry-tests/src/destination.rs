// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Call-recording destination runtime.

use bridge_core::{
    ApplicationType, CalibrationState, CommitStep, ConfigTarget, DestinationRuntime, Mat34,
    PlayAreaSize, RuntimeFault, WallQuad,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// One recorded call, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationCall {
    /// `initialize`.
    Initialize(ApplicationType),
    /// `calibration_state`.
    CalibrationState,
    /// `working_collision_bounds_count`.
    WorkingBoundsCount,
    /// `revert_working_copy`.
    Revert,
    /// `set_working_standing_pose`.
    SetStandingPose(Mat34),
    /// `set_working_play_area_size`.
    SetPlayAreaSize(PlayAreaSize),
    /// `set_working_collision_bounds`.
    SetCollisionBounds(Vec<WallQuad>),
    /// `commit_working_copy`.
    Commit(ConfigTarget),
    /// `set_setting_i32`.
    SetSettingI32 {
        /// Settings section.
        section: String,
        /// Setting key.
        key: String,
        /// Value written.
        value: i32,
    },
    /// `sync_settings`.
    SyncSettings,
    /// `shutdown`.
    Shutdown,
}

impl DestinationCall {
    /// Returns `true` for the `SetWorking*` staging calls.
    pub fn is_staging(&self) -> bool {
        matches!(
            self,
            Self::SetStandingPose(_) | Self::SetPlayAreaSize(_) | Self::SetCollisionBounds(_)
        )
    }
}

/// Destination call that [`RecordingDestination`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationFailure {
    /// `initialize` fails.
    Initialize,
    /// The call behind a commit step fails.
    Step(CommitStep),
    /// The existing-bounds probe fails.
    BoundsProbe,
    /// `set_setting_i32` fails.
    Setting,
    /// `sync_settings` fails.
    Sync,
}

/// Staged or committed chaperone state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChaperoneState {
    /// Standing-zero pose.
    pub standing_pose: Option<Mat34>,
    /// Play-area size.
    pub play_area: Option<PlayAreaSize>,
    /// Collision bounds.
    pub bounds: Vec<WallQuad>,
}

struct Inner {
    calls: Vec<DestinationCall>,
    failures: HashSet<DestinationFailure>,
    calibration: CalibrationState,
    calibration_queried: bool,
    working: ChaperoneState,
    live: ChaperoneState,
}

/// In-memory [`DestinationRuntime`] that records every call in order.
///
/// Like the runtimes it stands in for, it rejects working-copy mutations
/// until the calibration state has been queried. Clones share state.
#[derive(Clone)]
pub struct RecordingDestination {
    inner: Arc<Mutex<Inner>>,
}

impl Default for RecordingDestination {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDestination {
    /// Destination with empty live configuration and `Ok` calibration.
    pub fn new() -> Self {
        Self::with_live(ChaperoneState::default())
    }

    /// Destination whose live configuration starts as `live`.
    pub fn with_live(live: ChaperoneState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                calls: Vec::new(),
                failures: HashSet::new(),
                calibration: CalibrationState::Ok,
                calibration_queried: false,
                working: live.clone(),
                live,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes `call` fail from now on.
    pub fn fail(&self, call: DestinationFailure) -> &Self {
        self.lock().failures.insert(call);
        self
    }

    /// Sets the calibration state reported.
    pub fn set_calibration(&self, state: CalibrationState) -> &Self {
        self.lock().calibration = state;
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<DestinationCall> {
        self.lock().calls.clone()
    }

    /// Committed live state.
    pub fn live(&self) -> ChaperoneState {
        self.lock().live.clone()
    }

    /// Index of the first recorded call matching `pred`.
    pub fn position(&self, pred: impl Fn(&DestinationCall) -> bool) -> Option<usize> {
        self.lock().calls.iter().position(pred)
    }

    fn record(&self, call: DestinationCall, failure: DestinationFailure) -> Result<(), RuntimeFault> {
        let mut inner = self.lock();
        let mutates = call.is_staging() || matches!(call, DestinationCall::Revert);
        inner.calls.push(call);
        if mutates && !inner.calibration_queried {
            return Err(RuntimeFault::new(
                108,
                "working copy unavailable: calibration state not queried",
            ));
        }
        if inner.failures.contains(&failure) {
            return Err(RuntimeFault::new(-1, format!("injected {failure:?} failure")));
        }
        Ok(())
    }
}

impl DestinationRuntime for RecordingDestination {
    fn initialize(&self, app: ApplicationType) -> Result<(), RuntimeFault> {
        self.record(DestinationCall::Initialize(app), DestinationFailure::Initialize)
    }

    fn calibration_state(&self) -> CalibrationState {
        let mut inner = self.lock();
        inner.calls.push(DestinationCall::CalibrationState);
        inner.calibration_queried = true;
        inner.calibration
    }

    fn working_collision_bounds_count(&self) -> Result<usize, RuntimeFault> {
        self.record(DestinationCall::WorkingBoundsCount, DestinationFailure::BoundsProbe)?;
        Ok(self.lock().working.bounds.len())
    }

    fn revert_working_copy(&self) -> Result<(), RuntimeFault> {
        self.record(DestinationCall::Revert, DestinationFailure::Step(CommitStep::Revert))?;
        let mut inner = self.lock();
        inner.working = inner.live.clone();
        Ok(())
    }

    fn set_working_standing_pose(&self, pose: &Mat34) -> Result<(), RuntimeFault> {
        self.record(
            DestinationCall::SetStandingPose(*pose),
            DestinationFailure::Step(CommitStep::StagePose),
        )?;
        self.lock().working.standing_pose = Some(*pose);
        Ok(())
    }

    fn set_working_play_area_size(&self, size: PlayAreaSize) -> Result<(), RuntimeFault> {
        self.record(
            DestinationCall::SetPlayAreaSize(size),
            DestinationFailure::Step(CommitStep::StageAreaSize),
        )?;
        self.lock().working.play_area = Some(size);
        Ok(())
    }

    fn set_working_collision_bounds(&self, quads: &[WallQuad]) -> Result<(), RuntimeFault> {
        self.record(
            DestinationCall::SetCollisionBounds(quads.to_vec()),
            DestinationFailure::Step(CommitStep::StageBounds),
        )?;
        self.lock().working.bounds = quads.to_vec();
        Ok(())
    }

    fn commit_working_copy(&self, target: ConfigTarget) -> Result<(), RuntimeFault> {
        self.record(
            DestinationCall::Commit(target),
            DestinationFailure::Step(CommitStep::Commit),
        )?;
        let ConfigTarget::Live = target;
        let mut inner = self.lock();
        inner.live = inner.working.clone();
        Ok(())
    }

    fn set_setting_i32(&self, section: &str, key: &str, value: i32) -> Result<(), RuntimeFault> {
        self.record(
            DestinationCall::SetSettingI32 {
                section: section.to_string(),
                key: key.to_string(),
                value,
            },
            DestinationFailure::Setting,
        )
    }

    fn sync_settings(&self) -> Result<(), RuntimeFault> {
        self.record(DestinationCall::SyncSettings, DestinationFailure::Sync)
    }

    fn shutdown(&self) {
        self.lock().calls.push(DestinationCall::Shutdown);
    }
}
