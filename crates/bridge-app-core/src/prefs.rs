// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted preferences for a boundary-bridge run.

use serde::{Deserialize, Serialize};

/// Config key under which [`BridgePrefs`] is stored.
pub const PREFS_KEY: &str = "bridge";

/// Height of every extruded wall quad, in metres.
///
/// Matches the wall height the destination runtime draws for its own
/// room-setup boundaries; there is no documented source for the value.
pub const DEFAULT_WALL_HEIGHT: f32 = 2.43;

/// Delay between the settings sync and destination shutdown.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 5000;

/// Tracking origin the source runtime reports boundary points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackingOrigin {
    /// Eye-level origin; lines up with the destination's raw tracking frame.
    #[default]
    EyeLevel,
    /// Floor-level origin.
    FloorLevel,
}

/// What the commit pipeline stages into the collision bounds.
///
/// Picked per invocation, never saved with [`BridgePrefs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Stage the extruded guardian walls.
    WriteBoundary,
    /// Stage an explicitly empty bounds set.
    ClearBoundary,
}

/// Saved preferences for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgePrefs {
    /// Wall height in metres.
    pub wall_height: f32,
    /// Source tracking origin mode.
    pub tracking_origin: TrackingOrigin,
    /// Alpha applied to the destination's collision-bounds colour after commit.
    pub bounds_alpha: i32,
    /// Milliseconds to wait before shutting the destination down.
    pub settle_delay_ms: u64,
}

impl Default for BridgePrefs {
    fn default() -> Self {
        Self {
            wall_height: DEFAULT_WALL_HEIGHT,
            tracking_origin: TrackingOrigin::default(),
            bounds_alpha: 0,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}
