use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Durable key-value slot holding one serialized record.
///
/// Implementations decide the medium; callers only rely on
/// "what was last saved is what load returns".
pub trait SnapshotStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&mut self, snapshot: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-process slot, used by tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Option<String>,
    saves: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        MemorySnapshotStore {
            slot: Some(snapshot.into()),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, snapshot: &str) -> Result<(), StoreError> {
        self.slot = Some(snapshot.to_string());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}

/// JSON file on disk. Writes go through a temp file and a rename so a
/// crash never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> Result<&Path, StoreError> {
        match self.path.parent() {
            Some(p) if p.as_os_str().is_empty() => Ok(Path::new(".")),
            Some(p) => Ok(p),
            None => Err(StoreError::MissingParent(self.path.display().to_string())),
        }
    }

    /// Sibling of the snapshot; a leftover one is overwritten by the next save.
    fn staging_path(&self, dir: &Path) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        dir.join(format!(".{name}.partial"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, snapshot: &str) -> Result<(), StoreError> {
        let dir = self.dir()?;
        fs::create_dir_all(dir)?;
        let staging = self.staging_path(dir);
        let mut file = File::create(&staging)?;
        file.write_all(snapshot.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&staging, &self.path)?;
        // Directory fsync is best effort; not every platform allows it.
        if let Ok(d) = File::open(dir) {
            let _ = d.sync_all();
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
