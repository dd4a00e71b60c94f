//! Key-addressed durable cache for whole models.
//!
//! The cache serializes entire model values with bincode, independent of the
//! JSON document codec: native field types the document path cannot express
//! (byte blobs, exact floats, fields outside the schema) survive a cache
//! round trip. Storage is delegated to a [`ByteStore`], keyed by opaque
//! caller-chosen strings.
//!
//! Writes are whole-or-nothing per key: a failed store leaves the previous
//! entry (if any) readable. Concurrent stores under one key race and the
//! last completed put wins; callers needing read-modify-write atomicity must
//! serialize externally.

use crate::{error::Result, Error, Model};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Durable byte storage keyed by opaque strings.
///
/// `get` of an unknown key is `Ok(None)`, never an error. `put` either fully
/// persists the bytes under the key or fails leaving the previous entry
/// unchanged.
pub trait ByteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// In-memory byte store for tests and ephemeral caches.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ByteStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// File-per-key byte store rooted at a directory.
///
/// Filenames are the hex SHA-256 of the key, so keys may contain any
/// characters. Writes go to a temp file first and are renamed into place;
/// a crash mid-write never corrupts the previous entry.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| Error::Storage(e.to_string()))?;
        Ok(Self { root })
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(key.as_bytes());
        let mut name = String::with_capacity(digest.len() * 2 + 4);
        for byte in digest {
            let _ = write!(name, "{byte:02x}");
        }
        name.push_str(".bin");
        self.root.join(name)
    }
}

impl ByteStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");

        let write = |tmp: &Path| -> std::io::Result<()> {
            let mut file = fs::File::create(tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(tmp, &path)
        };

        write(&tmp).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::Storage(e.to_string())
        })?;

        trace!(key, path = %path.display(), len = bytes.len(), "wrote cache entry");
        Ok(())
    }
}

/// Key-addressed cache for whole models and model sequences.
#[derive(Debug, Clone, Default)]
pub struct RecordCache<S> {
    store: S,
}

impl<S: ByteStore> RecordCache<S> {
    /// Create a cache over a byte store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying byte store.
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Serialize a whole model and persist it under `key`, replacing any
    /// previous entry.
    pub fn store<M>(&mut self, model: &M, key: &str) -> Result<()>
    where
        M: Model + Serialize,
    {
        let bytes = bincode::serde::encode_to_vec(model, bincode::config::standard())
            .map_err(|e| Error::Storage(e.to_string()))?;
        debug!(key, len = bytes.len(), "storing record");
        self.store.put(key, &bytes)
    }

    /// Load the model stored under `key`.
    ///
    /// An absent key is `Ok(None)`. Present bytes that fail to deserialize
    /// are a [`Error::CorruptEntry`], never treated as absent. The model's
    /// [`after_load`](Model::after_load) hook runs before the model is
    /// returned.
    pub fn load<M>(&self, key: &str) -> Result<Option<M>>
    where
        M: Model + DeserializeOwned,
    {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        let (mut model, _): (M, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard()).map_err(
                |e| Error::CorruptEntry {
                    key: key.to_string(),
                    reason: e.to_string(),
                },
            )?;
        model.after_load();
        debug!(key, "loaded record");
        Ok(Some(model))
    }

    /// Serialize an ordered sequence of models atomically under one key.
    pub fn store_many<M>(&mut self, models: &[M], key: &str) -> Result<()>
    where
        M: Model + Serialize,
    {
        let bytes = bincode::serde::encode_to_vec(models, bincode::config::standard())
            .map_err(|e| Error::Storage(e.to_string()))?;
        debug!(key, count = models.len(), len = bytes.len(), "storing records");
        self.store.put(key, &bytes)
    }

    /// Load the model sequence stored under `key`, in its original order.
    /// Runs [`after_load`](Model::after_load) on every element.
    pub fn load_many<M>(&self, key: &str) -> Result<Option<Vec<M>>>
    where
        M: Model + DeserializeOwned,
    {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        let (mut models, _): (Vec<M>, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard()).map_err(
                |e| Error::CorruptEntry {
                    key: key.to_string(),
                    reason: e.to_string(),
                },
            )?;
        for model in &mut models {
            model.after_load();
        }
        debug!(key, count = models.len(), "loaded records");
        Ok(Some(models))
    }
}
