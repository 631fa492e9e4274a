// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
//! Boundary reconciliation between a guardian runtime and a chaperone runtime.
//!
//! A run is a strict sequence with no state kept between invocations:
//!
//! 1. [`reader`] reads the play-area and outer polygons plus play-area
//!    dimensions from a [`SourceRuntime`].
//! 2. [`reconcile`] takes the play-area centroid as the shared origin.
//! 3. [`extrude`] turns the outer polygon into vertical [`WallQuad`]s.
//! 4. [`pipeline`] reverts, stages and commits the destination working copy
//!    through a [`DestinationRuntime`], then adjusts one display setting.
//!
//! Runtime handles are held by the guards in [`scope`] and released on every
//! exit path. All failures surface as [`BridgeError`].

pub mod boundary;
pub mod error;
pub mod extrude;
pub mod pipeline;
pub mod plan;
pub mod ports;
pub mod reader;
pub mod reconcile;
pub mod run;
pub mod scope;

pub use bridge_app_core::prefs::{BoundaryMode, BridgePrefs, TrackingOrigin};
pub use bridge_geom::{Mat34, Vec3};
pub use boundary::{BoundaryKind, BoundaryPoint, BoundaryPolygon, PlayAreaSize, SourceBoundary, WallQuad};
pub use error::{BridgeError, CommitStep, QueryPhase, RuntimeFault};
pub use pipeline::{apply_bounds_settings, commit_boundary, CommitReport, SettingsOutcome};
pub use plan::CommitPlan;
pub use ports::{
    ApplicationType, CalibrationState, ConfigTarget, DestinationRuntime, SourceRuntime,
    COLLISION_BOUNDS_ALPHA_KEY, COLLISION_BOUNDS_SECTION,
};
pub use run::{plan_boundary, run_bridge, BridgeReport};
