//! JSON file persistence for dashboard documents.
//!
//! Each dashboard lives in `<base>/<id>.json`, keyed by
//! [`DashboardDocument::id`]. Ids are used as file stems verbatim, so only
//! ASCII alphanumerics, `-` and `_` are accepted.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dashboard::DashboardDocument;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Dashboard not found: {0}")]
    NotFound(String),
    #[error("Invalid dashboard id {0:?}")]
    InvalidId(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Stores dashboards as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::Io(format!("Failed to create {}: {}", base_path.display(), e))
        })?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, id: &str) -> StorageResult<PathBuf> {
        let usable = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !usable {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", id)))
    }

    /// Write `document` under its own id, replacing any earlier save.
    ///
    /// Undo history is not persisted.
    pub fn save(&self, document: &DashboardDocument) -> StorageResult<PathBuf> {
        let path = self.document_path(&document.id)?;
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::debug!("saved dashboard {} to {}", document.id, path.display());
        Ok(path)
    }

    /// Read the dashboard saved under `id`.
    ///
    /// The widget layout is re-validated on the way in, and the stored
    /// document must carry the id it was requested by.
    pub fn load(&self, id: &str) -> StorageResult<DashboardDocument> {
        let path = self.document_path(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let json = fs::read_to_string(&path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let document = DashboardDocument::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if document.id != id {
            return Err(StorageError::Serialization(format!(
                "{} holds dashboard {}, expected {}",
                path.display(),
                document.id,
                id
            )));
        }
        Ok(document)
    }
}
