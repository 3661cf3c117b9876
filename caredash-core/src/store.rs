// caredash-core/src/store.rs
use crate::WidgetSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to replace {path:?} with {temp_path:?}: {source}")]
    Replace {
        path: PathBuf,
        temp_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Store rejected write: {0}")]
    Rejected(String),
}

/// One placed widget, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: WidgetSize,
    pub position: u32,
    pub visible: bool,
}

/// Result of reading the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// Nothing was ever saved
    Missing,
    Layout(Vec<WidgetInstance>),
    /// Something was saved but cannot be used
    Unreadable(String),
}

impl Loaded {
    pub fn into_layout(self) -> Option<Vec<WidgetInstance>> {
        match self {
            Loaded::Layout(layout) => Some(layout),
            Loaded::Missing | Loaded::Unreadable(_) => None,
        }
    }
}

/// Durable slot holding the user's widget layout
pub trait LayoutStore {
    /// Saved layout, telling an empty slot apart from an unreadable one
    fn read(&self) -> Loaded;

    /// Saved layout, or `None` when nothing was saved or the value is unreadable
    fn load(&self) -> Option<Vec<WidgetInstance>> {
        self.read().into_layout()
    }

    /// Overwrite the saved layout
    fn save(&mut self, layout: &[WidgetInstance]) -> Result<(), StoreError>;
}

fn decode(content: &str, source: &str) -> Loaded {
    match serde_json::from_str(content) {
        Ok(layout) => Loaded::Layout(layout),
        Err(e) => {
            tracing::warn!("Ignoring unreadable layout in {}: {}", source, e);
            Loaded::Unreadable(e.to_string())
        }
    }
}

/// Layout persisted as a JSON file at a fixed path
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    path: PathBuf,
}

impl FileLayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/caredash/layout.json`, falling back to the working directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("caredash"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("layout.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "layout.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl LayoutStore for FileLayoutStore {
    fn read(&self) -> Loaded {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No saved layout at {:?}", self.path);
                return Loaded::Missing;
            }
            Err(e) => {
                tracing::warn!("Failed to read layout {:?}: {}", self.path, e);
                return Loaded::Unreadable(e.to_string());
            }
        };

        let loaded = decode(&content, &self.path.to_string_lossy());
        if let Loaded::Layout(layout) = &loaded {
            tracing::info!("Loaded {} widgets from {:?}", layout.len(), self.path);
        }
        loaded
    }

    fn save(&mut self, layout: &[WidgetInstance]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(layout)?;
        let temp_path = self.temp_path();

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Replace {
                path: self.path.clone(),
                temp_path,
                source,
            });
        }

        tracing::info!("Saved {} widgets to {:?}", layout.len(), self.path);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    raw: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-process layout slot for tests and embedders; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutStore {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw serialized text, readable or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::default();
        store.with_slot(|slot| slot.raw = Some(raw.into()));
        store
    }

    /// Make subsequent writes fail, as a full disk or quota would
    pub fn set_fail_writes(&self, fail: bool) {
        self.with_slot(|slot| slot.fail_writes = fail);
    }

    pub fn raw(&self) -> Option<String> {
        self.with_slot(|slot| slot.raw.clone())
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.with_slot(|slot| slot.writes)
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut MemorySlot) -> T) -> T {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut slot)
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn read(&self) -> Loaded {
        match self.raw() {
            Some(raw) => decode(&raw, "memory store"),
            None => Loaded::Missing,
        }
    }

    fn save(&mut self, layout: &[WidgetInstance]) -> Result<(), StoreError> {
        let json = serde_json::to_string(layout)?;
        self.with_slot(|slot| {
            if slot.fail_writes {
                return Err(StoreError::Rejected("storage quota exceeded".to_string()));
            }
            slot.raw = Some(json);
            slot.writes += 1;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<WidgetInstance> {
        vec![
            WidgetInstance {
                id: "metrics-hospitals-1700000000000".to_string(),
                kind: "metrics-hospitals".to_string(),
                size: WidgetSize::Small,
                position: 0,
                visible: true,
            },
            WidgetInstance {
                id: "activity-recent-1700000000001".to_string(),
                kind: "activity-recent".to_string(),
                size: WidgetSize::Full,
                position: 3,
                visible: false,
            },
        ]
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(&sample()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "metrics-hospitals-1700000000000",
                "type": "metrics-hospitals",
                "size": "small",
                "position": 0,
                "visible": true
            })
        );
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileLayoutStore::new(dir.path().join("nested/layout.json"));

        assert!(store.load().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn test_file_store_overwrites_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut store = FileLayoutStore::new(&path);

        store.save(&sample()).unwrap();
        store.save(&sample()[..1]).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "temp file should be renamed away");
    }

    #[test]
    fn test_file_store_corrupt_content_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(FileLayoutStore::new(&path).load().is_none());

        fs::write(&path, r#"[{"id": "a", "type": "x", "size": "gigantic", "position": 0, "visible": true}]"#)
            .unwrap();
        assert!(FileLayoutStore::new(&path).load().is_none());
    }

    #[test]
    fn test_file_store_distinguishes_missing_from_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let store = FileLayoutStore::new(&path);

        assert_eq!(store.read(), Loaded::Missing);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(store.read(), Loaded::Unreadable(_)));
    }

    #[test]
    fn test_file_store_failed_replace_keeps_cause_and_cleans_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        // A non-empty directory cannot be replaced by a file
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let mut store = FileLayoutStore::new(&path);

        let err = store.save(&sample()).unwrap_err();

        assert!(matches!(err, StoreError::Replace { .. }), "got {:?}", err);
        assert!(std::error::Error::source(&err).is_some());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("layout.json")]);
    }

    #[test]
    fn test_memory_store_shares_slot_between_clones() {
        let store = MemoryLayoutStore::new();
        let mut writer = store.clone();

        assert!(store.load().is_none());
        writer.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_memory_store_failing_writes_keep_previous_value() {
        let mut store = MemoryLayoutStore::new();
        store.save(&sample()).unwrap();
        store.set_fail_writes(true);

        assert!(matches!(store.save(&[]), Err(StoreError::Rejected(_))));
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn test_memory_store_garbage_reads_as_none() {
        assert!(MemoryLayoutStore::with_raw("garbage").load().is_none());
        assert!(matches!(
            MemoryLayoutStore::with_raw("garbage").read(),
            Loaded::Unreadable(_)
        ));
        assert_eq!(MemoryLayoutStore::new().read(), Loaded::Missing);
        assert_eq!(MemoryLayoutStore::with_raw("[]").load(), Some(vec![]));
    }
}
