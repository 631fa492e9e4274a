// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collaborator ports for the two VR runtimes.
//!
//! Adapters wrap a concrete SDK (or a file, or a test double). Methods take
//! `&self`; adapters that mutate internal state use interior mutability.
//! Acquisition and release are paired by the guards in [`crate::scope`], so
//! callers never invoke `initialize`/`shutdown` directly.

use crate::boundary::{BoundaryKind, BoundaryPoint, PlayAreaSize, WallQuad};
use crate::error::RuntimeFault;
use bridge_app_core::prefs::TrackingOrigin;
use bridge_geom::{Mat34, Vec3};
use serde::Serialize;

/// Settings section holding collision-bounds appearance keys.
pub const COLLISION_BOUNDS_SECTION: &str = "collisionBounds";

/// Alpha channel of the collision-bounds colour.
pub const COLLISION_BOUNDS_ALPHA_KEY: &str = "CollisionBoundsColorGammaA";

/// Runtime that reports the user's guardian boundary.
pub trait SourceRuntime {
    /// Session value handed back to every boundary query.
    type Session;

    /// Initializes the runtime for this process.
    fn initialize(&self) -> Result<(), RuntimeFault>;
    /// Creates a session.
    fn create_session(&self) -> Result<Self::Session, RuntimeFault>;
    /// Selects the tracking origin boundary points are reported in.
    fn set_tracking_origin(&self, session: &Self::Session, origin: TrackingOrigin);
    /// First query phase: number of points in the polygon.
    fn boundary_point_count(
        &self,
        session: &Self::Session,
        kind: BoundaryKind,
    ) -> Result<usize, RuntimeFault>;
    /// Second query phase: fills `buffer` and returns how many points were written.
    fn boundary_points(
        &self,
        session: &Self::Session,
        kind: BoundaryKind,
        buffer: &mut [BoundaryPoint],
    ) -> Result<usize, RuntimeFault>;
    /// Extents of the polygon's bounding box (x, y, z).
    fn boundary_dimensions(
        &self,
        session: &Self::Session,
        kind: BoundaryKind,
    ) -> Result<Vec3, RuntimeFault>;
    /// Releases a session.
    fn destroy_session(&self, session: &Self::Session);
    /// Releases the runtime.
    fn shutdown(&self);
}

/// Kind of application the destination runtime is initialized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationType {
    /// Full scene application; required for chaperone setup.
    Scene,
}

/// Chaperone calibration state reported by the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationState {
    /// Calibrated and usable.
    Ok,
    /// Usable but degraded (moved or missing tracking references).
    Warning,
    /// Unusable (invalid bounds or uninitialized tracking).
    Error,
}

/// Which configuration a working copy is committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigTarget {
    /// The persisted configuration every other consumer reads.
    Live,
}

/// Runtime that consumes the chaperone configuration.
///
/// `calibration_state` must be queried once before the destination accepts
/// any working-copy mutation.
pub trait DestinationRuntime {
    /// Initializes the runtime as the given application type.
    fn initialize(&self, app: ApplicationType) -> Result<(), RuntimeFault>;
    /// Queries calibration state.
    fn calibration_state(&self) -> CalibrationState;
    /// Number of collision-bounds quads in the current working copy.
    fn working_collision_bounds_count(&self) -> Result<usize, RuntimeFault>;
    /// Discards uncommitted working-copy changes.
    fn revert_working_copy(&self) -> Result<(), RuntimeFault>;
    /// Stages the standing-zero pose in the raw tracking frame.
    fn set_working_standing_pose(&self, pose: &Mat34) -> Result<(), RuntimeFault>;
    /// Stages play-area size.
    fn set_working_play_area_size(&self, size: PlayAreaSize) -> Result<(), RuntimeFault>;
    /// Stages collision-bounds quads; an empty slice clears the bounds.
    fn set_working_collision_bounds(&self, quads: &[WallQuad]) -> Result<(), RuntimeFault>;
    /// Publishes the working copy.
    fn commit_working_copy(&self, target: ConfigTarget) -> Result<(), RuntimeFault>;
    /// Writes an integer setting.
    fn set_setting_i32(&self, section: &str, key: &str, value: i32) -> Result<(), RuntimeFault>;
    /// Flushes settings to storage.
    fn sync_settings(&self) -> Result<(), RuntimeFault>;
    /// Releases the runtime.
    fn shutdown(&self);
}
