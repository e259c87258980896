//! JSON file snapshot backend.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is renamed over the target, so a
//!   crash mid-write leaves the previous snapshot intact.
//! - A missing file loads as `None`.

use super::snapshot::Snapshot;
use super::{PersistError, PersistResult, SnapshotStore};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let snapshot = Snapshot::from_json(&raw)
            .map_err(|err| PersistError::Corrupt(format!("invalid snapshot json: {err}")))?;
        super::checked(snapshot).map(Some)
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        let encoded = snapshot.to_json().map_err(PersistError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, encoded.as_bytes()).map_err(|err| self.io_error(err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| self.io_error(err))?;

        debug!(
            "event=snapshot_save module=persist status=ok backend=json_file notes={} categories={}",
            snapshot.notes.len(),
            snapshot.categories.len()
        );
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "json_file"
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileSnapshotStore;
    use std::path::Path;

    #[test]
    fn temp_path_is_a_sibling_of_target() {
        let store = JsonFileSnapshotStore::new("/data/notes/snapshot.json");
        assert_eq!(
            store.temp_path(),
            Path::new("/data/notes/snapshot.json.tmp")
        );
    }
}
