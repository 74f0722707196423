//! Single-file JSON store. Writes go through a sibling temp file and a
//! rename so a crash mid-write never leaves a truncated document behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `<platform data dir>/linkstash/data.json`.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "linkstash")
            .ok_or_else(|| Error::Store("no home directory available".to_string()))?;
        Ok(FileStore::new(dirs.data_dir().join("data.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn load_raw(&self) -> Result<Option<Value>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(doc)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_save_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));

        let seeded = store.load().unwrap();
        assert!(store.path().exists());

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, seeded);
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/deep/data.json"));
        store.save(&Document::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_surfaces_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(path);
        assert!(matches!(store.load_raw(), Err(Error::Serialization(_))));
    }
}
