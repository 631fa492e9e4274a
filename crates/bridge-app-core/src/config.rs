// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Keyed JSON documents over a raw blob store.
//!
//! Prefs, the chaperone document and the destination settings all go through
//! [`ConfigService`]; only the [`ConfigStore`] behind it differs between the
//! binary (filesystem) and tests (in memory).

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Raw blob storage keyed by document name.
pub trait ConfigStore {
    /// Returns the blob for `key`, or [`ConfigError::NotFound`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces the blob for `key` as a whole; readers never observe a
    /// partial write.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        (**self).save_raw(key, data)
    }
}

/// Config store and document errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No blob stored under the key.
    #[error("no document stored under `{0}`")]
    NotFound(String),
    /// Store I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored blob is not a valid document.
    #[error("document `{key}` is malformed: {source}")]
    Decode {
        /// Document key.
        key: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// Value could not be encoded.
    #[error("document `{key}` could not be encoded: {source}")]
    Encode {
        /// Document key.
        key: String,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Store-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Typed JSON access to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Unwraps the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Document under `key`; `None` when absent or empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => return Ok(None),
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Document under `key`, or `T::default()` when absent.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, ConfigError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Stores `value` under `key` as pretty JSON.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value).map_err(|source| ConfigError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.save_raw(key, &data)
    }
}
