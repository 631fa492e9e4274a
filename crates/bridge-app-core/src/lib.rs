// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for boundary-bridge tools (config, prefs).
//! Keeps runtime adapters and the CLI thin and storage-agnostic.

pub mod config;
pub mod prefs;
