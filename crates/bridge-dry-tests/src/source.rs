// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scriptable source runtime.

use bridge_core::{BoundaryKind, BoundaryPoint, RuntimeFault, SourceRuntime, TrackingOrigin, Vec3};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Source call that [`FakeSource`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFailure {
    /// `initialize` fails.
    Initialize,
    /// `create_session` fails.
    CreateSession,
    /// Count phase for the given polygon fails.
    Count(BoundaryKind),
    /// Fill phase for the given polygon fails.
    Points(BoundaryKind),
    /// Fill phase writes one point fewer than the count phase reported.
    ShortFill(BoundaryKind),
    /// `boundary_dimensions` fails.
    Dimensions,
}

#[derive(Default)]
struct Inner {
    play_area: Vec<BoundaryPoint>,
    outer: Vec<BoundaryPoint>,
    dimensions: Vec3,
    failures: HashSet<SourceFailure>,
    initialized: usize,
    shutdowns: usize,
    next_session: u32,
    open_sessions: HashSet<u32>,
    destroyed: usize,
    tracking_origin: Option<TrackingOrigin>,
}

/// In-memory [`SourceRuntime`] with failure injection and acquire/release
/// counters. Clones share state.
#[derive(Clone, Default)]
pub struct FakeSource {
    inner: Arc<Mutex<Inner>>,
}

impl FakeSource {
    /// Source reporting the given polygons and play-area dimensions.
    pub fn new(play_area: Vec<BoundaryPoint>, outer: Vec<BoundaryPoint>, dimensions: Vec3) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                play_area,
                outer,
                dimensions,
                ..Inner::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes `call` fail from now on.
    pub fn fail(&self, call: SourceFailure) -> &Self {
        self.lock().failures.insert(call);
        self
    }

    /// Times `initialize` succeeded.
    pub fn initialized(&self) -> usize {
        self.lock().initialized
    }

    /// Times `shutdown` ran.
    pub fn shutdowns(&self) -> usize {
        self.lock().shutdowns
    }

    /// Sessions created and not yet destroyed.
    pub fn open_sessions(&self) -> usize {
        self.lock().open_sessions.len()
    }

    /// Sessions destroyed.
    pub fn destroyed_sessions(&self) -> usize {
        self.lock().destroyed
    }

    /// Last tracking origin selected.
    pub fn tracking_origin(&self) -> Option<TrackingOrigin> {
        self.lock().tracking_origin
    }

    fn check(inner: &Inner, call: SourceFailure) -> Result<(), RuntimeFault> {
        if inner.failures.contains(&call) {
            return Err(RuntimeFault::new(-1, format!("injected {call:?} failure")));
        }
        Ok(())
    }

    fn polygon(inner: &Inner, kind: BoundaryKind) -> &[BoundaryPoint] {
        match kind {
            BoundaryKind::PlayArea => &inner.play_area,
            BoundaryKind::Outer => &inner.outer,
        }
    }

    fn require_session(inner: &Inner, session: u32) -> Result<(), RuntimeFault> {
        if inner.open_sessions.contains(&session) {
            Ok(())
        } else {
            Err(RuntimeFault::new(-2, format!("session {session} is not open")))
        }
    }
}

impl SourceRuntime for FakeSource {
    type Session = u32;

    fn initialize(&self) -> Result<(), RuntimeFault> {
        let mut inner = self.lock();
        Self::check(&inner, SourceFailure::Initialize)?;
        inner.initialized += 1;
        Ok(())
    }

    fn create_session(&self) -> Result<u32, RuntimeFault> {
        let mut inner = self.lock();
        Self::check(&inner, SourceFailure::CreateSession)?;
        inner.next_session += 1;
        let id = inner.next_session;
        inner.open_sessions.insert(id);
        Ok(id)
    }

    fn set_tracking_origin(&self, _session: &u32, origin: TrackingOrigin) {
        self.lock().tracking_origin = Some(origin);
    }

    fn boundary_point_count(&self, session: &u32, kind: BoundaryKind) -> Result<usize, RuntimeFault> {
        let inner = self.lock();
        Self::require_session(&inner, *session)?;
        Self::check(&inner, SourceFailure::Count(kind))?;
        Ok(Self::polygon(&inner, kind).len())
    }

    fn boundary_points(
        &self,
        session: &u32,
        kind: BoundaryKind,
        buffer: &mut [BoundaryPoint],
    ) -> Result<usize, RuntimeFault> {
        let inner = self.lock();
        Self::require_session(&inner, *session)?;
        Self::check(&inner, SourceFailure::Points(kind))?;
        let points = Self::polygon(&inner, kind);
        let mut n = points.len().min(buffer.len());
        if inner.failures.contains(&SourceFailure::ShortFill(kind)) {
            n = n.saturating_sub(1);
        }
        buffer[..n].copy_from_slice(&points[..n]);
        Ok(n)
    }

    fn boundary_dimensions(&self, session: &u32, _kind: BoundaryKind) -> Result<Vec3, RuntimeFault> {
        let inner = self.lock();
        Self::require_session(&inner, *session)?;
        Self::check(&inner, SourceFailure::Dimensions)?;
        Ok(inner.dimensions)
    }

    fn destroy_session(&self, session: &u32) {
        let mut inner = self.lock();
        if inner.open_sessions.remove(session) {
            inner.destroyed += 1;
        }
    }

    fn shutdown(&self) {
        self.lock().shutdowns += 1;
    }
}
