//! The durable key-value store underneath every collection.
//!
//! The store maps a closed set of named keys to JSON documents. A
//! [`Storage`] backend handles raw persistence; the typed [`Store`] facade
//! on top isolates every other component from serialization, and is the
//! only place that decides how read failures are treated: a missing or
//! corrupt value is empty state, a genuine I/O failure is an error.
//!
//! The on-disk layout of [`FileStore`] is one file per key:
//!
//! ```text
//! <base_dir>/
//!     todayArrivals.json
//!     currentlyInHouse.json
//!     checkoutHistory.json
//!     pendingRequests.json
//!     hotelToken.json
//!     hotelUser.json
//! ```
//!
//! Writes go through a temporary file and a rename so a crash mid-write
//! never leaves a half-written document behind.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// The closed set of persisted keys.
///
/// The string form of each key matches the name the original app used,
/// and doubles as the file stem in [`FileStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Reservations expected or in progress for check-in.
    TodayArrivals,
    /// Guests currently checked into a room; unique by guest id.
    CurrentlyInHouse,
    /// Append-only log of completed stays.
    CheckoutHistory,
    /// Guest service requests.
    PendingRequests,
    /// Mock admin session token.
    HotelToken,
    /// Mock admin user record.
    HotelUser,
}

impl StoreKey {
    /// The persisted name of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::TodayArrivals => "todayArrivals",
            StoreKey::CurrentlyInHouse => "currentlyInHouse",
            StoreKey::CheckoutHistory => "checkoutHistory",
            StoreKey::PendingRequests => "pendingRequests",
            StoreKey::HotelToken => "hotelToken",
            StoreKey::HotelUser => "hotelUser",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw persistence backend for the store.
///
/// Implementations move serialized JSON strings in and out of durable
/// storage; they never interpret the payload. The trait is the injection
/// seam that lets the rest of the crate run against a directory, an
/// in-memory map, or anything else in tests.
pub trait Storage: Send + Sync {
    /// Read the raw document for `key`, or `None` if the key has never
    /// been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be read.
    fn load(&self, key: StoreKey) -> Result<Option<String>, StorageError>;

    /// Replace the document for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be written.
    fn save(&self, key: StoreKey, value: &str) -> Result<(), StorageError>;

    /// Write several keys as one logical unit.
    ///
    /// The default implementation writes the entries in order. Backends
    /// may override to narrow the window in which a crash leaves some
    /// keys updated and others not; in the single-threaded session this
    /// crate targets, no reader can observe the intermediate state either
    /// way.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] encountered; earlier entries in
    /// the batch may already have been written.
    fn save_many(&self, entries: &[(StoreKey, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.save(*key, value)?;
        }
        Ok(())
    }

    /// Delete the document for `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be written.
    fn remove(&self, key: StoreKey) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Directory-backed [`Storage`]: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(StorageError::Unavailable)?;
        Ok(Self { base_dir })
    }

    /// Root directory of this store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: StoreKey) -> PathBuf {
        self.base_dir.join(format!("{}.json", key.as_str()))
    }

    /// Write `value` to a temporary file, then rename it into place.
    fn write_atomic(&self, key: StoreKey, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp_path = self.base_dir.join(format!("{}.json.tmp", key.as_str()));
        let io_err = |source| StorageError::Io { key, source };
        fs::write(&tmp_path, value).map_err(io_err)?;
        fs::rename(&tmp_path, &path).map_err(io_err)?;
        Ok(())
    }
}

impl Storage for FileStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn save(&self, key: StoreKey, value: &str) -> Result<(), StorageError> {
        self.write_atomic(key, value)
    }

    fn save_many(&self, entries: &[(StoreKey, String)]) -> Result<(), StorageError> {
        // Stage every temporary file first, then rename them all, so the
        // window in which a crash tears the batch is as small as the
        // filesystem allows.
        for (key, value) in entries {
            let tmp_path = self.base_dir.join(format!("{}.json.tmp", key.as_str()));
            fs::write(&tmp_path, value).map_err(|source| StorageError::Io {
                key: *key,
                source,
            })?;
        }
        for (key, _) in entries {
            let tmp_path = self.base_dir.join(format!("{}.json.tmp", key.as_str()));
            fs::rename(&tmp_path, self.path_for(*key)).map_err(|source| StorageError::Io {
                key: *key,
                source,
            })?;
        }
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory [`Storage`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&key).cloned())
    }

    fn save(&self, key: StoreKey, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, value.to_owned());
        Ok(())
    }

    fn save_many(&self, batch: &[(StoreKey, String)]) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (key, value) in batch {
            entries.insert(*key, value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(&key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Typed facade
// ---------------------------------------------------------------------------

/// Typed interface over a [`Storage`] backend.
///
/// `Clone` is cheap -- the backend is `Arc`-wrapped and shared.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Storage>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Wrap a backend in the typed facade.
    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self { backend }
    }

    /// Read the array stored under `key`.
    ///
    /// An absent key yields an empty vector. A corrupt stored value also
    /// yields an empty vector -- it is logged and treated as empty state,
    /// the behavior every call site of the original app relied on. Only
    /// genuine I/O failures are returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn get_list<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Vec<T>, StorageError> {
        match self.backend.load(key)? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(items) => Ok(items),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "corrupt stored value, treating as empty");
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Replace the array stored under `key`. No partial or merge
    /// semantics: callers read-modify-write the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the write fails.
    pub fn set_list<T: Serialize>(&self, key: StoreKey, items: &[T]) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(items).map_err(|source| StorageError::Serialize { key, source })?;
        self.backend.save(key, &json)
    }

    /// Read the scalar value stored under `key` (session keys).
    ///
    /// Absent and corrupt values both yield `None`, mirroring
    /// [`get_list`](Store::get_list).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn get_value<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StorageError> {
        match self.backend.load(key)? {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "corrupt stored value, treating as absent");
                    Ok(None)
                }
            },
        }
    }

    /// Replace the scalar value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the write fails.
    pub fn set_value<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|source| StorageError::Serialize { key, source })?;
        self.backend.save(key, &json)
    }

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    pub fn clear_value(&self, key: StoreKey) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Apply a staged multi-key write in one backend call.
    ///
    /// This is the primitive lifecycle transitions use to update several
    /// collections as a single logical unit instead of independent writes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend write fails.
    pub fn commit(&self, batch: WriteBatch) -> Result<(), StorageError> {
        if batch.entries.is_empty() {
            return Ok(());
        }
        tracing::debug!(keys = batch.entries.len(), "committing write batch");
        self.backend.save_many(&batch.entries)
    }
}

/// A staged multi-key write, serialized eagerly so that a serialization
/// failure surfaces before anything touches the backend.
#[derive(Debug, Default)]
pub struct WriteBatch {
    entries: Vec<(StoreKey, String)>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a full-array replacement for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the items cannot be serialized.
    pub fn put_list<T: Serialize>(
        &mut self,
        key: StoreKey,
        items: &[T],
    ) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(items).map_err(|source| StorageError::Serialize { key, source })?;
        self.entries.push((key, json));
        Ok(())
    }

    /// Number of staged keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch has no staged writes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
