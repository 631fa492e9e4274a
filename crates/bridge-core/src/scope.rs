// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scoped acquisition of runtime handles.
//!
//! Each guard releases what it acquired when dropped, so early returns via `?`
//! still destroy the source session and shut both runtimes down. Borrowing
//! enforces the release order: a [`SourceSession`] borrows its
//! [`SourceHandle`] and is always dropped first.

use crate::error::BridgeError;
use crate::ports::{ApplicationType, DestinationRuntime, SourceRuntime};
use tracing::debug;

/// Initialized source runtime; shuts it down on drop.
pub struct SourceHandle<'r, R: SourceRuntime> {
    runtime: &'r R,
}

impl<'r, R: SourceRuntime> SourceHandle<'r, R> {
    /// Initializes `runtime`.
    pub fn acquire(runtime: &'r R) -> Result<Self, BridgeError> {
        runtime
            .initialize()
            .map_err(BridgeError::InitializationFailure)?;
        debug!("source runtime initialized");
        Ok(Self { runtime })
    }

    /// Creates a session that is destroyed when the returned guard drops.
    pub fn open_session(&self) -> Result<SourceSession<'_, R>, BridgeError> {
        let session = self
            .runtime
            .create_session()
            .map_err(BridgeError::SessionCreationFailure)?;
        debug!("source session created");
        Ok(SourceSession {
            runtime: self.runtime,
            session,
        })
    }
}

impl<R: SourceRuntime> Drop for SourceHandle<'_, R> {
    fn drop(&mut self) {
        self.runtime.shutdown();
        debug!("source runtime shut down");
    }
}

/// Open source session; destroyed on drop.
pub struct SourceSession<'h, R: SourceRuntime> {
    runtime: &'h R,
    session: R::Session,
}

impl<R: SourceRuntime> SourceSession<'_, R> {
    /// Runtime the session belongs to.
    pub fn runtime(&self) -> &R {
        self.runtime
    }

    /// Raw session value for port calls.
    pub fn session(&self) -> &R::Session {
        &self.session
    }
}

impl<R: SourceRuntime> Drop for SourceSession<'_, R> {
    fn drop(&mut self) {
        self.runtime.destroy_session(&self.session);
        debug!("source session destroyed");
    }
}

/// Initialized destination runtime; shuts it down on drop.
pub struct DestinationHandle<'r, D: DestinationRuntime> {
    runtime: &'r D,
}

impl<'r, D: DestinationRuntime> DestinationHandle<'r, D> {
    /// Initializes `runtime` as `app`.
    pub fn acquire(runtime: &'r D, app: ApplicationType) -> Result<Self, BridgeError> {
        runtime
            .initialize(app)
            .map_err(BridgeError::DestinationInitFailure)?;
        debug!(?app, "destination runtime initialized");
        Ok(Self { runtime })
    }

    /// Runtime behind the handle.
    pub fn runtime(&self) -> &D {
        self.runtime
    }
}

impl<D: DestinationRuntime> Drop for DestinationHandle<'_, D> {
    fn drop(&mut self) {
        self.runtime.shutdown();
        debug!("destination runtime shut down");
    }
}
