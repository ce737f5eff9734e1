//! Layout state codec and storage backends.
//!
//! [`LayoutState`] is the flat, serializable form of a layout: for every
//! container name, the ordered list of its panels with their size and
//! minimized state. Positions are never stored; they are recomputed on load.
//!
//! Storage is pluggable through [`StateStore`]. Backend failures are never
//! fatal: [`LayoutSystem`](crate::LayoutSystem) logs them and carries on with
//! the current layout.

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sidedock_core::alloc::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Persisted state of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub name: String,
    pub minimized: bool,
    pub width: i32,
    pub height: i32,
}

/// Persisted layout keyed by container name, in container registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutState {
    containers: IndexMap<String, Vec<PanelRecord>>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records of a container, replacing any previous entry.
    pub fn insert(&mut self, container: impl Into<String>, records: Vec<PanelRecord>) {
        self.containers.insert(container.into(), records);
    }

    pub fn get(&self, container: &str) -> Option<&[PanelRecord]> {
        self.containers.get(container).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PanelRecord])> {
        self.containers
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Key-value backend the layout state is persisted in.
pub trait StateStore {
    /// Read the value stored under `key`, `None` if nothing was saved.
    fn load(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Overwrite the raw value under `key`, bypassing the codec.
    pub fn put(&self, key: &str, value: impl Into<String>) {
        self.entries.lock().insert(key.to_string(), value.into());
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.put(key, value);
        Ok(())
    }
}

/// Directory-backed store writing one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }
}
