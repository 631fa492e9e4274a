// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Source boundary reader.
//!
//! Every query is checked at its call site and propagated; boundary geometry
//! does not change during a run, so nothing here retries.

use crate::boundary::{BoundaryKind, BoundaryPoint, BoundaryPolygon, SourceBoundary};
use crate::error::{BridgeError, QueryPhase};
use crate::ports::SourceRuntime;
use crate::scope::{SourceHandle, SourceSession};
use bridge_app_core::prefs::TrackingOrigin;
use bridge_geom::Vec3;
use tracing::{debug, info, instrument};

/// Reads one polygon with the two-phase count-then-fill query.
///
/// The returned polygon has exactly as many points as the count phase
/// reported; a fill that writes a different number is rejected.
pub fn read_polygon<R: SourceRuntime>(
    session: &SourceSession<'_, R>,
    kind: BoundaryKind,
) -> Result<BoundaryPolygon, BridgeError> {
    let runtime = session.runtime();
    let reported = runtime
        .boundary_point_count(session.session(), kind)
        .map_err(|source| BridgeError::BoundaryQueryFailure {
            kind,
            phase: QueryPhase::Count,
            source,
        })?;

    let mut points = vec![BoundaryPoint::ZERO; reported];
    let returned = runtime
        .boundary_points(session.session(), kind, &mut points)
        .map_err(|source| BridgeError::BoundaryQueryFailure {
            kind,
            phase: QueryPhase::Points,
            source,
        })?;
    if returned != reported {
        return Err(BridgeError::PointCountMismatch {
            kind,
            reported,
            returned,
        });
    }

    debug!(%kind, points = reported, "boundary polygon read");
    Ok(BoundaryPolygon::new(kind, points))
}

/// Reads the bounding dimensions of a polygon.
pub fn read_dimensions<R: SourceRuntime>(
    session: &SourceSession<'_, R>,
    kind: BoundaryKind,
) -> Result<Vec3, BridgeError> {
    session
        .runtime()
        .boundary_dimensions(session.session(), kind)
        .map_err(BridgeError::DimensionQueryFailure)
}

/// Reads the play area, outer boundary and play-area dimensions in one
/// scoped pass.
///
/// The source runtime and its session are released before this returns,
/// whether it succeeds or not.
#[instrument(skip(runtime))]
pub fn read_boundary<R: SourceRuntime>(
    runtime: &R,
    origin: TrackingOrigin,
) -> Result<SourceBoundary, BridgeError> {
    let handle = SourceHandle::acquire(runtime)?;
    let session = handle.open_session()?;
    runtime.set_tracking_origin(session.session(), origin);

    let play_area = read_polygon(&session, BoundaryKind::PlayArea)?;
    let outer = read_polygon(&session, BoundaryKind::Outer)?;
    let dimensions = read_dimensions(&session, BoundaryKind::PlayArea)?;

    info!(
        play_area_points = play_area.len(),
        outer_points = outer.len(),
        dimensions = ?dimensions.to_array(),
        "source boundary read"
    );
    Ok(SourceBoundary {
        play_area,
        outer,
        dimensions,
    })
}
