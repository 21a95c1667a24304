use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::Snapshot;

/// Loads and saves the whole session snapshot.
pub trait SnapshotStore {
    /// Never fails: a missing or unreadable snapshot yields the default one.
    fn load(&self) -> Snapshot;

    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Snapshot stored as a single pretty-printed JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist or is empty.
    fn read(&self) -> Result<Option<Snapshot>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading {}", self.path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Snapshot {
        match self.read() {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Loaded {} projects and {} records from {}",
                    snapshot.projects.len(),
                    snapshot.records.len(),
                    self.path.display()
                );
                snapshot
            }
            Ok(None) => {
                log::info!("No data at {}, starting fresh", self.path.display());
                Snapshot::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable data file: {err:#}");
                Snapshot::default()
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write leaves the previous snapshot intact.
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
        let temp_path = self.temp_path();
        {
            let mut file = File::create(&temp_path)
                .with_context(|| format!("creating {}", temp_path.display()))?;
            file.write_all(content.as_bytes())
                .with_context(|| format!("writing {}", temp_path.display()))?;
            file.sync_all()
                .with_context(|| format!("syncing {}", temp_path.display()))?;
        }
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        log::debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
