// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Captured boundary snapshot and the source runtime that replays it.

use bridge_app_core::prefs::TrackingOrigin;
use bridge_core::{BoundaryKind, BoundaryPoint, RuntimeFault, SourceRuntime};
use bridge_geom::{Aabb, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Fault code: snapshot could not be loaded.
pub const FAULT_LOAD: i32 = -1000;
/// Fault code: call made before `initialize`.
pub const FAULT_NOT_INITIALIZED: i32 = -1001;
/// Fault code: unknown or destroyed session.
pub const FAULT_INVALID_SESSION: i32 = -1002;

/// Boundary geometry captured from a source runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySnapshot {
    /// Origin mode the points were captured in.
    #[serde(default)]
    pub tracking_origin: TrackingOrigin,
    /// Play-area polygon.
    pub play_area: Vec<Vec3>,
    /// Outer guardian polygon.
    pub outer: Vec<Vec3>,
    /// Play-area dimensions; derived from the play area's bounds when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_area_dimensions: Option<Vec3>,
}

/// Snapshot loading errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File could not be read.
    #[error("reading {path}: {source}")]
    Io {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File is not a valid snapshot document.
    #[error("parsing {path}: {source}")]
    Parse {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A coordinate overflowed `f32`.
    #[error("{path}: non-finite {kind} point at index {index}")]
    NonFinite {
        /// Snapshot path.
        path: PathBuf,
        /// Polygon holding the point.
        kind: BoundaryKind,
        /// Point index within the polygon.
        index: usize,
    },
}

impl BoundarySnapshot {
    /// Loads a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self =
            serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        for kind in [BoundaryKind::PlayArea, BoundaryKind::Outer] {
            if let Some(index) = snapshot.polygon(kind).iter().position(|p| !p.is_finite()) {
                return Err(SnapshotError::NonFinite {
                    path: path.to_path_buf(),
                    kind,
                    index,
                });
            }
        }
        Ok(snapshot)
    }

    /// Polygon of the given kind.
    pub fn polygon(&self, kind: BoundaryKind) -> &[Vec3] {
        match kind {
            BoundaryKind::PlayArea => &self.play_area,
            BoundaryKind::Outer => &self.outer,
        }
    }

    /// Dimensions of a polygon: the recorded value for the play area if
    /// present, otherwise its bounding-box extents (zero when empty).
    pub fn dimensions(&self, kind: BoundaryKind) -> Vec3 {
        if kind == BoundaryKind::PlayArea {
            if let Some(d) = self.play_area_dimensions {
                return d;
            }
        }
        Aabb::from_points(self.polygon(kind)).map_or(Vec3::ZERO, |bb| bb.extents())
    }
}

#[derive(Default)]
struct State {
    snapshot: Option<BoundarySnapshot>,
    next_session: u64,
    open: HashSet<u64>,
}

/// [`SourceRuntime`] that replays a [`BoundarySnapshot`].
///
/// A path-backed source reads the file on `initialize`; an in-memory source
/// is ready immediately.
pub struct SnapshotSource {
    path: Option<PathBuf>,
    preloaded: Option<BoundarySnapshot>,
    state: Mutex<State>,
}

impl SnapshotSource {
    /// Source that loads `path` when initialized.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            preloaded: None,
            state: Mutex::new(State::default()),
        }
    }

    /// Source backed by an in-memory snapshot.
    pub fn from_snapshot(snapshot: BoundarySnapshot) -> Self {
        Self {
            path: None,
            preloaded: Some(snapshot),
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_snapshot<T>(
        &self,
        session: u64,
        f: impl FnOnce(&BoundarySnapshot) -> T,
    ) -> Result<T, RuntimeFault> {
        let state = self.lock();
        if !state.open.contains(&session) {
            return Err(RuntimeFault::new(
                FAULT_INVALID_SESSION,
                format!("session {session} is not open"),
            ));
        }
        state
            .snapshot
            .as_ref()
            .map(f)
            .ok_or_else(|| RuntimeFault::new(FAULT_NOT_INITIALIZED, "snapshot source not initialized"))
    }
}

impl SourceRuntime for SnapshotSource {
    type Session = u64;

    fn initialize(&self) -> Result<(), RuntimeFault> {
        let snapshot = match (&self.preloaded, &self.path) {
            (Some(s), _) => s.clone(),
            (None, Some(path)) => BoundarySnapshot::load(path)
                .map_err(|e| RuntimeFault::new(FAULT_LOAD, e.to_string()))?,
            (None, None) => {
                return Err(RuntimeFault::new(FAULT_LOAD, "no snapshot configured"));
            }
        };
        debug!(
            play_area = snapshot.play_area.len(),
            outer = snapshot.outer.len(),
            "boundary snapshot loaded"
        );
        self.lock().snapshot = Some(snapshot);
        Ok(())
    }

    fn create_session(&self) -> Result<u64, RuntimeFault> {
        let mut state = self.lock();
        if state.snapshot.is_none() {
            return Err(RuntimeFault::new(
                FAULT_NOT_INITIALIZED,
                "snapshot source not initialized",
            ));
        }
        state.next_session += 1;
        let id = state.next_session;
        state.open.insert(id);
        Ok(id)
    }

    fn set_tracking_origin(&self, _session: &u64, origin: TrackingOrigin) {
        let captured = self.lock().snapshot.as_ref().map(|s| s.tracking_origin);
        if let Some(captured) = captured {
            if captured != origin {
                warn!(
                    ?captured,
                    requested = ?origin,
                    "snapshot was captured in a different tracking origin; points are replayed as-is"
                );
            }
        }
    }

    fn boundary_point_count(&self, session: &u64, kind: BoundaryKind) -> Result<usize, RuntimeFault> {
        self.with_snapshot(*session, |s| s.polygon(kind).len())
    }

    fn boundary_points(
        &self,
        session: &u64,
        kind: BoundaryKind,
        buffer: &mut [BoundaryPoint],
    ) -> Result<usize, RuntimeFault> {
        self.with_snapshot(*session, |s| {
            let points = s.polygon(kind);
            let n = points.len().min(buffer.len());
            buffer[..n].copy_from_slice(&points[..n]);
            n
        })
    }

    fn boundary_dimensions(&self, session: &u64, kind: BoundaryKind) -> Result<Vec3, RuntimeFault> {
        self.with_snapshot(*session, |s| s.dimensions(kind))
    }

    fn destroy_session(&self, session: &u64) {
        self.lock().open.remove(session);
    }

    fn shutdown(&self) {
        self.lock().snapshot = None;
    }
}
