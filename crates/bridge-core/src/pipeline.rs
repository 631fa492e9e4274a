// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Destination commit pipeline.
//!
//! Step order is fixed: revert, stage pose, stage area size, stage bounds,
//! commit. The first failing step aborts the rest. Atomicity of the commit is
//! the destination's responsibility; the pipeline only guarantees order.

use crate::error::{BridgeError, CommitStep, RuntimeFault};
use crate::plan::CommitPlan;
use crate::ports::{
    CalibrationState, ConfigTarget, DestinationRuntime, COLLISION_BOUNDS_ALPHA_KEY,
    COLLISION_BOUNDS_SECTION,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// What the commit transaction observed and published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    /// Calibration state queried before the transaction.
    pub calibration: CalibrationState,
    /// Quad count in the reverted working copy, if the probe succeeded.
    pub previous_quads: Option<usize>,
    /// Quads published.
    pub quads_committed: usize,
}

/// Result of the best-effort settings step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SettingsOutcome {
    /// Setting written and synced.
    Applied,
    /// Setting or sync failed; the committed boundary is unaffected.
    Failed(String),
}

fn run_step(step: CommitStep, result: Result<(), RuntimeFault>) -> Result<(), BridgeError> {
    result.map_err(|source| BridgeError::CommitStepFailure { step, source })?;
    debug!(%step, "commit step done");
    Ok(())
}

/// Stages `plan` into the destination working copy and commits it live.
#[instrument(skip(destination, plan), fields(mode = ?plan.mode, quads = plan.walls.len()))]
pub fn commit_boundary<D: DestinationRuntime>(
    destination: &D,
    plan: &CommitPlan,
) -> Result<CommitReport, BridgeError> {
    let calibration = destination.calibration_state();
    if calibration == CalibrationState::Ok {
        debug!(?calibration, "destination calibration state");
    } else {
        warn!(?calibration, "destination calibration is not ok; replacing bounds anyway");
    }

    run_step(CommitStep::Revert, destination.revert_working_copy())?;

    let previous_quads = match destination.working_collision_bounds_count() {
        Ok(n) => Some(n),
        Err(fault) => {
            warn!(%fault, "could not probe existing collision bounds");
            None
        }
    };
    debug!(?previous_quads, "working copy reverted");

    run_step(
        CommitStep::StagePose,
        destination.set_working_standing_pose(&plan.standing_pose),
    )?;
    run_step(
        CommitStep::StageAreaSize,
        destination.set_working_play_area_size(plan.play_area),
    )?;
    run_step(
        CommitStep::StageBounds,
        destination.set_working_collision_bounds(&plan.walls),
    )?;
    run_step(
        CommitStep::Commit,
        destination.commit_working_copy(ConfigTarget::Live),
    )?;

    info!(
        quads = plan.walls.len(),
        width = plan.play_area.width,
        depth = plan.play_area.depth,
        "boundary committed to live configuration"
    );
    Ok(CommitReport {
        calibration,
        previous_quads,
        quads_committed: plan.walls.len(),
    })
}

/// Sets the collision-bounds alpha and syncs settings.
///
/// Runs after the boundary commit and never fails the run.
pub fn apply_bounds_settings<D: DestinationRuntime>(destination: &D, alpha: i32) -> SettingsOutcome {
    let result = destination
        .set_setting_i32(COLLISION_BOUNDS_SECTION, COLLISION_BOUNDS_ALPHA_KEY, alpha)
        .and_then(|()| destination.sync_settings());
    match result {
        Ok(()) => {
            info!(alpha, "collision bounds alpha applied");
            SettingsOutcome::Applied
        }
        Err(fault) => {
            warn!(%fault, "settings adjustment failed; committed boundary kept");
            SettingsOutcome::Failed(fault.to_string())
        }
    }
}
