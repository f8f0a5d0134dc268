//! Durable storage for the named-layout table.
//!
//! The whole table lives in one storage entry as a JSON object of
//! `layoutName -> [desk, ...]`. Every save rewrites the entire entry.
//! Reads never fail to the caller: missing or malformed data degrades to an
//! empty table.

use crate::error::{Result, SeatError};
use crate::model::LayoutTable;
use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A single string-valued storage slot (browser `localStorage` entry, file, ...).
pub trait LayoutStorage {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored contents.
    fn write(&mut self, contents: &str) -> Result<()>;
}

// ─── In-memory storage ───────────────────────────────────────────────────

/// Storage backed by a shared in-process buffer. Clones share the buffer,
/// so a test can keep a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Rc::new(RefCell::new(Some(contents.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl LayoutStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

// ─── File storage ────────────────────────────────────────────────────────

/// Storage in a single JSON file, for native hosts.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SeatError::PersistenceUnavailable(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        let unavailable =
            |e: std::io::Error| SeatError::PersistenceUnavailable(format!("{}: {e}", self.path.display()));
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        std::fs::write(&self.path, contents).map_err(unavailable)
    }
}

// ─── Gateway ─────────────────────────────────────────────────────────────

/// Converts between the in-memory layout table and its serialized form.
pub struct PersistenceGateway {
    storage: Box<dyn LayoutStorage>,
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}

impl PersistenceGateway {
    pub fn new(storage: impl LayoutStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Read the layout table. Absent, unreadable, or unparseable data all
    /// yield an empty table.
    pub fn load(&self) -> LayoutTable {
        let text = match self.storage.read() {
            Ok(Some(text)) => text,
            Ok(None) => return LayoutTable::new(),
            Err(e) => {
                log::warn!("layout storage unreadable, starting empty: {e}");
                return LayoutTable::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("stored layouts are malformed, starting empty: {e}");
                LayoutTable::new()
            }
        }
    }

    /// Serialize and write the full table, replacing prior contents.
    pub fn save(&mut self, table: &LayoutTable) -> Result<()> {
        let text = serde_json::to_string(table)
            .map_err(|e| SeatError::PersistenceUnavailable(e.to_string()))?;
        self.storage.write(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DeskId;
    use crate::model::{Desk, DeskKind, Position};
    use pretty_assertions::assert_eq;

    struct Unreadable;

    impl LayoutStorage for Unreadable {
        fn read(&self) -> Result<Option<String>> {
            Err(SeatError::PersistenceUnavailable("denied".into()))
        }

        fn write(&mut self, _contents: &str) -> Result<()> {
            Err(SeatError::PersistenceUnavailable("denied".into()))
        }
    }

    fn sample_table() -> LayoutTable {
        let desk = Desk::new(DeskId::intern("pg_1"), DeskKind::Teacher, Position::new(0.0, 75.0));
        LayoutTable::from([("Exam".to_string(), vec![desk])])
    }

    #[test]
    fn empty_storage_loads_empty_table() {
        let gateway = PersistenceGateway::new(MemoryStorage::new());
        assert!(gateway.load().is_empty());
    }

    #[test]
    fn malformed_storage_loads_empty_table() {
        let gateway = PersistenceGateway::new(MemoryStorage::with_contents("{not json"));
        assert!(gateway.load().is_empty());

        let wrong_shape = PersistenceGateway::new(MemoryStorage::with_contents("[1,2,3]"));
        assert!(wrong_shape.load().is_empty());
    }

    #[test]
    fn unreadable_storage_loads_empty_table() {
        let gateway = PersistenceGateway::new(Unreadable);
        assert!(gateway.load().is_empty());
    }

    #[test]
    fn save_rewrites_whole_table() {
        let storage = MemoryStorage::with_contents(r#"{"Old":[]}"#);
        let mut gateway = PersistenceGateway::new(storage.clone());
        gateway.save(&sample_table()).unwrap();

        let written = storage.contents().unwrap();
        assert!(!written.contains("Old"));
        assert_eq!(gateway.load(), sample_table());
    }

    #[test]
    fn failed_write_is_reported() {
        let mut gateway = PersistenceGateway::new(Unreadable);
        let err = gateway.save(&sample_table()).unwrap_err();
        assert!(matches!(err, SeatError::PersistenceUnavailable(_)));
    }

    #[test]
    fn file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("layouts.json"));
        assert_eq!(storage.read().unwrap(), None);

        let mut gateway = PersistenceGateway::new(storage.clone());
        gateway.save(&sample_table()).unwrap();
        assert!(storage.path().exists());
        assert_eq!(PersistenceGateway::new(storage).load(), sample_table());
    }
}
