use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dirtrim_core::AppResult;

/// Snapshot of a single filesystem entry captured at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Path of the entry inside the target directory.
    pub path: PathBuf,
    /// Creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
}

/// Result of a single attempted deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// Path the deletion was attempted on.
    pub path: PathBuf,
    /// How the attempt ended.
    pub status: DeletionStatus,
}

/// Terminal state of a single deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
    /// Entry was removed.
    Deleted,
    /// Entry was already gone when the deletion ran.
    AlreadyGone,
    /// Deletion failed for a reason other than a missing entry.
    Failed(String),
}

/// Aggregate outcome of one truncation call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TruncationReport {
    /// Number of entries listed in the target directory.
    pub examined: usize,
    /// Number of entries beyond the retention limit.
    pub excess: usize,
    /// Per-entry deletion outcomes, oldest entry first.
    pub outcomes: Vec<DeletionOutcome>,
}

impl TruncationReport {
    /// Returns the number of entries actually removed.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == DeletionStatus::Deleted)
            .count()
    }

    /// Returns whether any deletion attempt failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| matches!(outcome.status, DeletionStatus::Failed(_)))
    }
}

/// Port for the filesystem operations the truncation engine needs.
pub trait FileSystem: Send + Sync {
    /// Returns whether `path` is an existing directory. Total for missing paths.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Lists the regular files directly inside `path`. Order is unspecified.
    fn list_files(&self, path: &Path) -> AppResult<Vec<DirectoryEntry>>;

    /// Lists the immediate child directories of `path`. Order is unspecified.
    fn list_directories(&self, path: &Path) -> AppResult<Vec<DirectoryEntry>>;

    /// Removes the single file at `path`.
    fn delete_file(&self, path: &Path) -> AppResult<()>;

    /// Removes the directory at `path` together with its entire subtree.
    fn delete_directory(&self, path: &Path) -> AppResult<()>;
}
