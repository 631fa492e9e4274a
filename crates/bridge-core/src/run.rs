// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end run: read, reconcile, commit.

use crate::boundary::PlayAreaSize;
use crate::error::BridgeError;
use crate::pipeline::{apply_bounds_settings, commit_boundary, CommitReport, SettingsOutcome};
use crate::plan::CommitPlan;
use crate::ports::{ApplicationType, DestinationRuntime, SourceRuntime};
use crate::reader::read_boundary;
use crate::scope::DestinationHandle;
use bridge_app_core::prefs::{BoundaryMode, BridgePrefs};
use bridge_geom::Vec3;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, instrument};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeReport {
    /// Write or clear.
    pub mode: BoundaryMode,
    /// Play-area centroid used as the standing origin.
    pub origin: Vec3,
    /// Staged play-area size.
    pub play_area: PlayAreaSize,
    /// Commit transaction summary.
    pub commit: CommitReport,
    /// Trailing settings step outcome.
    pub settings: SettingsOutcome,
}

/// Reads the source boundary and reconciles it into a plan without touching
/// the destination.
pub fn plan_boundary<S: SourceRuntime>(
    source: &S,
    prefs: &BridgePrefs,
    mode: BoundaryMode,
) -> Result<CommitPlan, BridgeError> {
    let boundary = read_boundary(source, prefs.tracking_origin)?;
    let plan = CommitPlan::build(&boundary, mode, prefs.wall_height)?;
    info!(
        origin = ?plan.origin.to_array(),
        walls = plan.walls.len(),
        "boundary reconciled"
    );
    Ok(plan)
}

/// Runs the full conversion: source read, reconcile, destination commit,
/// settings adjustment, settle delay.
///
/// The source is released before the destination is initialized, and the
/// destination is shut down on every exit path.
#[instrument(skip_all, fields(mode = ?mode))]
pub fn run_bridge<S, D>(
    source: &S,
    destination: &D,
    prefs: &BridgePrefs,
    mode: BoundaryMode,
) -> Result<BridgeReport, BridgeError>
where
    S: SourceRuntime,
    D: DestinationRuntime,
{
    let plan = plan_boundary(source, prefs, mode)?;

    let handle = DestinationHandle::acquire(destination, ApplicationType::Scene)?;
    let commit = commit_boundary(handle.runtime(), &plan)?;
    let settings = apply_bounds_settings(handle.runtime(), prefs.bounds_alpha);

    if prefs.settle_delay_ms > 0 {
        info!(ms = prefs.settle_delay_ms, "waiting for destination to persist");
        std::thread::sleep(Duration::from_millis(prefs.settle_delay_ms));
    }

    Ok(BridgeReport {
        mode: plan.mode,
        origin: plan.origin,
        play_area: plan.play_area,
        commit,
        settings,
    })
}
