//! Per-invocation scratch directory under the temp root.
//!
//! A [`Workspace`] owns `<root>/cdt_gies<uuid>/`. Dropping it removes the
//! directory, which covers error returns and dropped futures alike. The
//! success path calls [`Workspace::close`] so a failed removal is reported.

use std::{
    fs,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::error::{GiesError, Result};

pub const DIR_PREFIX: &str = "cdt_gies";
pub const DATA_FILE: &str = "data.csv";
pub const GAPS_FILE: &str = "fixedgaps.csv";
pub const RESULT_FILE: &str = "result.csv";

#[derive(Debug)]
pub struct Workspace {
    id: Uuid,
    path: PathBuf,
    removed: bool,
}

impl Workspace {
    /// Create a fresh directory under an existing `root`. A missing root is an error.
    pub fn create(root: &Path) -> Result<Self> {
        let id = Uuid::new_v4();
        let path = root.join(format!("{}{}", DIR_PREFIX, id));
        fs::create_dir(&path)?;
        tracing::debug!(workspace = %path.display(), "created workspace");
        Ok(Self {
            id,
            path,
            removed: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data_path(&self) -> PathBuf {
        self.path.join(DATA_FILE)
    }

    pub fn gaps_path(&self) -> PathBuf {
        self.path.join(GAPS_FILE)
    }

    pub fn result_path(&self) -> PathBuf {
        self.path.join(RESULT_FILE)
    }

    /// Remove the directory and report failure instead of swallowing it.
    pub fn close(mut self) -> Result<()> {
        self.removed = true;
        fs::remove_dir_all(&self.path).map_err(|source| GiesError::Cleanup {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(workspace = %self.path.display(), "removed workspace");
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        // Runs while an error is already propagating; never mask it.
        match fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!(workspace = %self.path.display(), "removed workspace"),
            Err(err) => tracing::warn!(
                workspace = %self.path.display(),
                error = %err,
                "failed to remove workspace"
            ),
        }
    }
}
