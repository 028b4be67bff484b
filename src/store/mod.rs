use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// A monitored URL as persisted in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access target store {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("target store {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to serialize target store {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("url is already monitored: {0}")]
    Duplicate(String),
    #[error("no target with id {0}")]
    NotFound(u64),
    #[error("url must not be empty")]
    EmptyUrl,
}

/// The keyed collection of monitored URLs.
pub trait TargetStore {
    fn list(&self) -> Result<Vec<Target>, StoreError>;
    fn add(&mut self, url: &str) -> Result<Target, StoreError>;
    fn remove(&mut self, id: u64) -> Result<Target, StoreError>;

    /// The URLs in collection order, as handed to a check run.
    fn urls(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.list()?.into_iter().map(|t| t.url).collect())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreFile {
    next_id: u64,
    targets: Vec<Target>,
}

/// Keeps the collection in a YAML file, rewritten on every change.
#[derive(Debug, Clone)]
pub struct YamlTargetStore {
    path: PathBuf,
}

impl YamlTargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<StoreFile, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        if contents.trim().is_empty() {
            return Ok(StoreFile::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes next to the store file and renames, so readers never see half a file.
    fn save(&self, file: &StoreFile) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(file).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut scratch = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        scratch
            .write_all(yaml.as_bytes())
            .map_err(|e| self.io_error(e))?;
        scratch
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl TargetStore for YamlTargetStore {
    fn list(&self) -> Result<Vec<Target>, StoreError> {
        Ok(self.load()?.targets)
    }

    fn add(&mut self, url: &str) -> Result<Target, StoreError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::EmptyUrl);
        }

        let mut file = self.load()?;
        if file.targets.iter().any(|t| t.url == url) {
            return Err(StoreError::Duplicate(url.to_string()));
        }

        // ids are never reused, even after the highest one is removed
        let id = file
            .next_id
            .max(file.targets.iter().map(|t| t.id).max().unwrap_or(0))
            + 1;
        let target = Target {
            id,
            url: url.to_string(),
        };
        file.next_id = id;
        file.targets.push(target.clone());
        self.save(&file)?;

        log::info!("Added target {id}: {url}");
        Ok(target)
    }

    fn remove(&mut self, id: u64) -> Result<Target, StoreError> {
        let mut file = self.load()?;
        let index = file
            .targets
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = file.targets.remove(index);
        self.save(&file)?;

        log::info!("Removed target {id}: {}", removed.url);
        Ok(removed)
    }
}
