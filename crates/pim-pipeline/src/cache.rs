//! Per-workflow storage for rows that have been cleaned but not yet pushed
//! for approval.
//!
//! Each workflow is one JSON file named `<workflow_id>.json` under the cache
//! directory. Writes go to a temporary sibling first and are renamed into
//! place, so a crash mid-save leaves the previous entry intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pim_core::SheetRow;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

const MAX_WORKFLOW_ID_LEN: usize = 64;

/// A cached batch of rows for one workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRows {
    pub workflow_id: String,
    pub saved_at: DateTime<Utc>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone)]
pub struct RowCache {
    dir: PathBuf,
}

impl RowCache {
    /// Opens (creating if needed) a cache rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replaces the cached rows for `workflow_id`.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidWorkflowId`] if the id is not a safe file stem.
    /// - [`CacheError::Io`] / [`CacheError::Json`] if the entry cannot be written.
    pub fn save(&self, workflow_id: &str, rows: Vec<SheetRow>) -> Result<CachedRows, CacheError> {
        let path = self.entry_path(workflow_id)?;
        let entry = CachedRows {
            workflow_id: workflow_id.to_owned(),
            saved_at: Utc::now(),
            rows,
        };

        let body = serde_json::to_vec_pretty(&entry).map_err(|source| CacheError::Json {
            path: path.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|source| CacheError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(workflow_id, rows = entry.rows.len(), "saved workflow rows");
        Ok(entry)
    }

    /// Loads the cached rows for `workflow_id`, or `None` if nothing is cached.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidWorkflowId`] if the id is not a safe file stem.
    /// - [`CacheError::Io`] on read failure other than not-found.
    /// - [`CacheError::Json`] if the entry is corrupt.
    pub fn load(&self, workflow_id: &str) -> Result<Option<CachedRows>, CacheError> {
        let path = self.entry_path(workflow_id)?;
        let body = match fs::read(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|source| CacheError::Json { path, source })
    }

    /// Removes the entry for `workflow_id`. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidWorkflowId`] if the id is not a safe file stem.
    /// - [`CacheError::Io`] on delete failure other than not-found.
    pub fn clear(&self, workflow_id: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(workflow_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    /// Lists cached workflow ids, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the cache directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>, CacheError> {
        let io_err = |source| CacheError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_workflow_id(stem) {
                    ids.push(stem.to_owned());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn entry_path(&self, workflow_id: &str) -> Result<PathBuf, CacheError> {
        if !is_valid_workflow_id(workflow_id) {
            return Err(CacheError::InvalidWorkflowId(workflow_id.to_owned()));
        }
        Ok(self.dir.join(format!("{workflow_id}.json")))
    }
}

fn is_valid_workflow_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_WORKFLOW_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
