// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! File-backed runtime adapters.
//!
//! - [`SnapshotSource`] replays a captured boundary snapshot (JSON) as a
//!   [`bridge_core::SourceRuntime`].
//! - [`StoreDestination`] keeps a working copy in memory and commits a
//!   chaperone document through any [`bridge_app_core::config::ConfigStore`].

pub mod snapshot;
pub mod store;

pub use snapshot::{BoundarySnapshot, SnapshotError, SnapshotSource};
pub use store::{ChaperoneDocument, DestinationSettings, StoreDestination, CHAPERONE_KEY, SETTINGS_KEY};
