// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors raised by the reconciliation pipeline.

use crate::boundary::BoundaryKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure reported by a runtime collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("runtime error {code}: {message}")]
pub struct RuntimeFault {
    /// Runtime-specific result code.
    pub code: i32,
    /// Human-readable description from the runtime or adapter.
    pub message: String,
}

impl RuntimeFault {
    /// Creates a fault from a code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Phase of the two-phase boundary point query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    /// Point count requested with no buffer.
    Count,
    /// Points copied into a caller-sized buffer.
    Points,
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("point count"),
            Self::Points => f.write_str("points"),
        }
    }
}

/// Strictly ordered steps of the destination commit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitStep {
    /// Discard uncommitted working-copy state.
    Revert,
    /// Stage the standing-zero pose.
    StagePose,
    /// Stage play-area width and depth.
    StageAreaSize,
    /// Stage the collision-bounds quads (possibly empty).
    StageBounds,
    /// Publish the working copy as the live configuration.
    Commit,
}

impl CommitStep {
    /// All steps, in execution order.
    pub const ORDER: [Self; 5] = [
        Self::Revert,
        Self::StagePose,
        Self::StageAreaSize,
        Self::StageBounds,
        Self::Commit,
    ];
}

impl fmt::Display for CommitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Revert => "revert working copy",
            Self::StagePose => "stage standing pose",
            Self::StageAreaSize => "stage play-area size",
            Self::StageBounds => "stage collision bounds",
            Self::Commit => "commit working copy",
        };
        f.write_str(name)
    }
}

/// Fatal pipeline errors. Each variant names the step that failed.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The source runtime could not be initialized.
    #[error("source runtime initialization failed: {0}")]
    InitializationFailure(#[source] RuntimeFault),
    /// A source session could not be created.
    #[error("source session creation failed: {0}")]
    SessionCreationFailure(#[source] RuntimeFault),
    /// Either phase of a boundary point query failed.
    #[error("{kind} boundary {phase} query failed: {source}")]
    BoundaryQueryFailure {
        /// Polygon being read.
        kind: BoundaryKind,
        /// Phase that failed.
        phase: QueryPhase,
        /// Runtime failure.
        #[source]
        source: RuntimeFault,
    },
    /// The fill phase returned a different number of points than the count phase.
    #[error("{kind} boundary reported {reported} points but returned {returned}")]
    PointCountMismatch {
        /// Polygon being read.
        kind: BoundaryKind,
        /// Count from the first phase.
        reported: usize,
        /// Count from the second phase.
        returned: usize,
    },
    /// A polygon has too few points for the operation.
    #[error("degenerate {kind} boundary: {found} points, at least {required} required")]
    DegenerateBoundary {
        /// Offending polygon.
        kind: BoundaryKind,
        /// Points present.
        found: usize,
        /// Minimum accepted.
        required: usize,
    },
    /// The play-area dimension query failed.
    #[error("play-area dimension query failed: {0}")]
    DimensionQueryFailure(#[source] RuntimeFault),
    /// Wall height is zero, negative, or not finite.
    #[error("wall height must be finite and positive, got {0}")]
    InvalidWallHeight(f32),
    /// The destination runtime could not be initialized.
    #[error("destination runtime initialization failed: {0}")]
    DestinationInitFailure(#[source] RuntimeFault),
    /// One of the five commit steps failed; nothing after it ran.
    #[error("commit step '{step}' failed: {source}")]
    CommitStepFailure {
        /// Step that failed.
        step: CommitStep,
        /// Runtime failure.
        #[source]
        source: RuntimeFault,
    },
}

impl BridgeError {
    /// Short name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InitializationFailure(_) => "source init",
            Self::SessionCreationFailure(_) => "source session",
            Self::BoundaryQueryFailure { .. } | Self::PointCountMismatch { .. } => "boundary read",
            Self::DegenerateBoundary { .. } | Self::InvalidWallHeight(_) => "reconcile",
            Self::DimensionQueryFailure(_) => "dimension read",
            Self::DestinationInitFailure(_) => "destination init",
            Self::CommitStepFailure { .. } => "commit",
        }
    }
}
