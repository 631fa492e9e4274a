// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boundary fixtures.

use crate::source::FakeSource;
use bridge_core::{BridgePrefs, Vec3};

/// Play-area dimensions matching [`room_play_area`].
pub const ROOM_DIMENSIONS: Vec3 = Vec3::new(2.0, 0.0, 2.0);

/// 2 m × 2 m play area whose centroid is `(0, 0, 1)`.
pub fn room_play_area() -> Vec<Vec3> {
    vec![
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 2.0),
        Vec3::new(-1.0, 0.0, 2.0),
    ]
}

/// 4 m × 4 m guardian around [`room_play_area`].
pub fn room_guardian() -> Vec<Vec3> {
    vec![
        Vec3::new(-2.0, 0.0, -1.0),
        Vec3::new(2.0, 0.0, -1.0),
        Vec3::new(2.0, 0.0, 3.0),
        Vec3::new(-2.0, 0.0, 3.0),
    ]
}

/// Source reporting the room fixtures.
pub fn room_source() -> FakeSource {
    FakeSource::new(room_play_area(), room_guardian(), ROOM_DIMENSIONS)
}

/// Right triangle on the floor.
pub fn triangle() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
    ]
}

/// Default prefs without the settle delay.
pub fn quick_prefs() -> BridgePrefs {
    BridgePrefs {
        settle_delay_ms: 0,
        ..BridgePrefs::default()
    }
}
