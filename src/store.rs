//! Versioned, file-backed project store.
//!
//! Projects are kept in one JSON file wrapped in a versioned envelope
//! `{ version, data, updatedAt }`. Legacy payloads written before the
//! envelope existed (a bare project array) are still read correctly.
//! The store is only ever mutated with completed projects; the wizard
//! never writes mid-session.

use crate::model::{now_millis, Project};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stored<T> {
    version: u32,
    data: T,
    updated_at: i64,
}

pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the project list. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Project>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;

        // Current format first, then the legacy bare array.
        if let Ok(stored) = serde_json::from_str::<Stored<Vec<Project>>>(&raw) {
            return Ok(stored.data);
        }
        serde_json::from_str::<Vec<Project>>(&raw)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Saves the project list under the versioned envelope.
    pub fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        let stored = Stored {
            version: CURRENT_VERSION,
            data: projects,
            updated_at: now_millis(),
        };
        let json =
            serde_json::to_string_pretty(&stored).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = projects.len(), "Project store saved");
        Ok(())
    }

    /// Inserts or replaces a project by id.
    pub fn upsert(&self, project: Project) -> Result<(), StoreError> {
        let mut projects = self.load()?;
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => projects.push(project),
        }
        self.save(&projects)
    }

    /// Removes a project by id; returns whether one was removed.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut projects = self.load()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        let removed = projects.len() != before;
        if removed {
            self.save(&projects)?;
        }
        Ok(removed)
    }
}
