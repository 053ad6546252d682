//! JSON-file task store.
//!
//! The store holds the single authoritative flat collection the engine
//! operates on. Saves go through a temp file in the same directory followed
//! by a rename, so a crash mid-write leaves the previous collection intact.

use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or writing the task file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error accessing '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Task file '{path}' is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk layout of the task file.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TaskFile {
    version: u32,
    tasks: Vec<Task>,
}

const TASK_FILE_VERSION: u32 = 1;

/// Handle to a task file on disk.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the flat collection. A missing file reads as an empty
    /// collection so first runs need no setup step.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            debug!("task file {:?} does not exist yet, starting empty", self.path);
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: TaskFile =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        debug!("loaded {} tasks from {:?}", file.tasks.len(), self.path);
        Ok(file.tasks)
    }

    /// Replace the stored collection atomically.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let file = TaskFile {
            version: TASK_FILE_VERSION,
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&file).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("saved {} tasks to {:?}", tasks.len(), self.path);
        Ok(())
    }
}
