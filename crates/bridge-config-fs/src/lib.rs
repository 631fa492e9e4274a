// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` (uses the platform config dir by default).

use bridge_app_core::config::{ConfigError, ConfigStore};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Store configs as JSON files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/boundary-bridge`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("org", "boundary-bridge", "boundary-bridge")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory the store writes into.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the JSON file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let path = self.path_for(key);
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::NotFound(key.to_string()))
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.base)?;
        // Unique staging file in the same directory, synced before it replaces the target.
        let mut staging = NamedTempFile::new_in(&self.base)?;
        staging.write_all(data)?;
        staging.as_file().sync_all()?;
        staging
            .persist(&path)
            .map_err(|err| ConfigError::Io(err.error))?;
        debug!(path = %path.display(), bytes = data.len(), "config blob saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        assert!(matches!(store.load_raw("absent"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn save_replaces_whole_blob_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        store.save_raw("bridge", b"first version, longer").unwrap();
        store.save_raw("bridge", b"second").unwrap();
        assert_eq!(store.load_raw("bridge").unwrap(), b"second");
        assert!(store.path_for("bridge").exists());
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("bridge.json")]);
    }

    #[test]
    fn stale_staging_entry_does_not_block_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        fs::create_dir(dir.path().join("chaperone_info.json.tmp")).unwrap();
        fs::write(dir.path().join("chaperone_info.json.tmp").join("junk"), b"x").unwrap();
        store.save_raw("chaperone_info", b"{}").unwrap();
        assert_eq!(store.load_raw("chaperone_info").unwrap(), b"{}");
    }

    #[test]
    fn saves_from_two_stores_on_one_directory_both_land() {
        let dir = tempfile::tempdir().unwrap();
        let a = FsConfigStore::at(dir.path()).unwrap();
        let b = FsConfigStore::at(dir.path()).unwrap();
        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..20 {
                    a.save_raw("bridge", b"aaaa").unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..20 {
                    b.save_raw("bridge", b"bbbb").unwrap();
                }
            });
        });
        let last = a.load_raw("bridge").unwrap();
        assert!(last == b"aaaa" || last == b"bbbb");
    }

    #[test]
    fn at_creates_nested_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FsConfigStore::at(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base(), nested.as_path());
    }
}
