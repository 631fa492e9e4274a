// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Destination runtime that persists its chaperone configuration through a
//! [`ConfigStore`].
//!
//! The working copy lives in memory; only `commit_working_copy` writes the
//! chaperone document, and the store replaces documents whole, so readers see
//! either the previous or the new configuration.

use bridge_app_core::config::{ConfigError, ConfigService, ConfigStore};
use bridge_core::{
    ApplicationType, CalibrationState, ConfigTarget, DestinationRuntime, PlayAreaSize,
    RuntimeFault, WallQuad,
};
use bridge_geom::Mat34;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// Store key of the live chaperone document.
pub const CHAPERONE_KEY: &str = "chaperone_info";
/// Store key of the settings document.
pub const SETTINGS_KEY: &str = "settings";

/// Fault code: working copy touched before calibration state was queried.
pub const FAULT_CALIBRATION_NOT_QUERIED: i32 = -2000;
/// Fault code: staging call made before the working copy was reverted.
pub const FAULT_NO_WORKING_COPY: i32 = -2001;
/// Fault code: the store failed.
pub const FAULT_STORE: i32 = -2002;

const DOCUMENT_VERSION: u32 = 1;

/// Persisted chaperone configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaperoneDocument {
    /// Document format version.
    pub version: u32,
    /// Standing-zero pose in the raw tracking frame.
    pub standing_pose: Mat34,
    /// Play-area width and depth.
    pub play_area: PlayAreaSize,
    /// Collision-bounds wall quads.
    pub collision_bounds: Vec<WallQuad>,
}

impl Default for ChaperoneDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            standing_pose: Mat34::identity(),
            play_area: PlayAreaSize {
                width: 0.0,
                depth: 0.0,
            },
            collision_bounds: Vec::new(),
        }
    }
}

/// Persisted runtime settings: `section -> key -> value`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationSettings {
    sections: BTreeMap<String, BTreeMap<String, i32>>,
}

impl DestinationSettings {
    /// Integer setting, if present.
    pub fn get_i32(&self, section: &str, key: &str) -> Option<i32> {
        self.sections.get(section)?.get(key).copied()
    }

    fn set_i32(&mut self, section: &str, key: &str, value: i32) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    fn merge(&mut self, other: &Self) {
        for (section, keys) in &other.sections {
            for (key, value) in keys {
                self.set_i32(section, key, *value);
            }
        }
    }
}

#[derive(Default)]
struct State {
    calibration_queried: bool,
    working: Option<ChaperoneDocument>,
    pending_settings: DestinationSettings,
}

/// [`DestinationRuntime`] backed by a [`ConfigStore`].
pub struct StoreDestination<S> {
    config: ConfigService<S>,
    state: Mutex<State>,
}

fn store_fault(err: &ConfigError) -> RuntimeFault {
    RuntimeFault::new(FAULT_STORE, err.to_string())
}

impl<S: ConfigStore> StoreDestination<S> {
    /// Destination persisting into `store`.
    pub fn new(store: S) -> Self {
        Self {
            config: ConfigService::new(store),
            state: Mutex::new(State::default()),
        }
    }

    /// Reads the live chaperone document, if one has been committed.
    pub fn live_document(&self) -> Result<Option<ChaperoneDocument>, ConfigError> {
        self.config.load(CHAPERONE_KEY)
    }

    /// Reads the persisted settings.
    pub fn settings(&self) -> Result<DestinationSettings, ConfigError> {
        self.config.load_or_default(SETTINGS_KEY)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn stage(&self, f: impl FnOnce(&mut ChaperoneDocument)) -> Result<(), RuntimeFault> {
        let mut state = self.lock();
        if !state.calibration_queried {
            return Err(RuntimeFault::new(
                FAULT_CALIBRATION_NOT_QUERIED,
                "calibration state must be queried before editing the working copy",
            ));
        }
        let doc = state.working.as_mut().ok_or_else(|| {
            RuntimeFault::new(FAULT_NO_WORKING_COPY, "working copy has not been reverted")
        })?;
        f(doc);
        Ok(())
    }
}

impl<S: ConfigStore> DestinationRuntime for StoreDestination<S> {
    fn initialize(&self, app: ApplicationType) -> Result<(), RuntimeFault> {
        *self.lock() = State::default();
        debug!(?app, "store destination initialized");
        Ok(())
    }

    fn calibration_state(&self) -> CalibrationState {
        let state = match self.live_document() {
            Ok(Some(doc)) if !doc.collision_bounds.is_empty() => CalibrationState::Ok,
            Ok(_) => CalibrationState::Warning,
            Err(err) => {
                debug!(%err, "live chaperone document unreadable");
                CalibrationState::Error
            }
        };
        self.lock().calibration_queried = true;
        state
    }

    fn working_collision_bounds_count(&self) -> Result<usize, RuntimeFault> {
        self.lock()
            .working
            .as_ref()
            .map(|doc| doc.collision_bounds.len())
            .ok_or_else(|| RuntimeFault::new(FAULT_NO_WORKING_COPY, "no working copy"))
    }

    fn revert_working_copy(&self) -> Result<(), RuntimeFault> {
        if !self.lock().calibration_queried {
            return Err(RuntimeFault::new(
                FAULT_CALIBRATION_NOT_QUERIED,
                "calibration state must be queried before editing the working copy",
            ));
        }
        // An unreadable live document reverts to an empty configuration; the
        // commit will overwrite it.
        let live = self.live_document().ok().flatten().unwrap_or_default();
        self.lock().working = Some(live);
        Ok(())
    }

    fn set_working_standing_pose(&self, pose: &Mat34) -> Result<(), RuntimeFault> {
        self.stage(|doc| doc.standing_pose = *pose)
    }

    fn set_working_play_area_size(&self, size: PlayAreaSize) -> Result<(), RuntimeFault> {
        self.stage(|doc| doc.play_area = size)
    }

    fn set_working_collision_bounds(&self, quads: &[WallQuad]) -> Result<(), RuntimeFault> {
        self.stage(|doc| doc.collision_bounds = quads.to_vec())
    }

    fn commit_working_copy(&self, target: ConfigTarget) -> Result<(), RuntimeFault> {
        let doc = self
            .lock()
            .working
            .clone()
            .ok_or_else(|| RuntimeFault::new(FAULT_NO_WORKING_COPY, "nothing to commit"))?;
        let ConfigTarget::Live = target;
        self.config
            .save(CHAPERONE_KEY, &doc)
            .map_err(|e| store_fault(&e))?;
        info!(key = CHAPERONE_KEY, quads = doc.collision_bounds.len(), "chaperone document committed");
        Ok(())
    }

    fn set_setting_i32(&self, section: &str, key: &str, value: i32) -> Result<(), RuntimeFault> {
        self.lock().pending_settings.set_i32(section, key, value);
        Ok(())
    }

    fn sync_settings(&self) -> Result<(), RuntimeFault> {
        let mut merged = self.settings().map_err(|e| store_fault(&e))?;
        let pending = std::mem::take(&mut self.lock().pending_settings);
        merged.merge(&pending);
        self.config
            .save(SETTINGS_KEY, &merged)
            .map_err(|e| store_fault(&e))?;
        debug!("settings synced");
        Ok(())
    }

    fn shutdown(&self) {
        let mut state = self.lock();
        if state.working.take().is_some() {
            debug!("working copy released");
        }
        state.pending_settings = DestinationSettings::default();
        state.calibration_queried = false;
    }
}
