// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for boundary-bridge crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`source`] - Scriptable source runtime with failure injection and
//!   acquire/release counters
//! - [`destination`] - Call-recording destination runtime
//! - [`fixtures`] - Boundary polygons and prefs used across test suites

pub mod config;
pub mod destination;
pub mod fixtures;
pub mod source;

pub use config::InMemoryConfigStore;
pub use destination::{ChaperoneState, DestinationCall, DestinationFailure, RecordingDestination};
pub use fixtures::{
    quick_prefs, room_guardian, room_play_area, room_source, triangle, ROOM_DIMENSIONS,
};
pub use source::{FakeSource, SourceFailure};
