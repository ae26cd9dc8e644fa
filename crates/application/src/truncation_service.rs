use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirtrim_core::{AppError, AppResult};
use tracing::{info, warn};

use crate::filesystem_ports::{
    DeletionOutcome, DeletionStatus, DirectoryEntry, FileSystem, TruncationReport,
};


/// Application service that trims a directory to a maximum entry count,
/// deleting the oldest entries first.
#[derive(Clone)]
pub struct TruncationService {
    target_directory: PathBuf,
    file_system: Arc<dyn FileSystem>,
}

/// Type of entry a truncation pass operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

impl TruncationService {
    /// Creates a truncation service for an existing target directory.
    pub fn new(
        target_directory: impl Into<String>,
        file_system: Arc<dyn FileSystem>,
    ) -> AppResult<Self> {
        let target_directory = target_directory.into();
        if target_directory.trim().is_empty() {
            return Err(AppError::Validation(
                "target directory must not be empty or whitespace".to_owned(),
            ));
        }

        let target_directory = PathBuf::from(target_directory);
        if !file_system.directory_exists(&target_directory) {
            return Err(AppError::Validation(format!(
                "target directory '{}' does not exist",
                target_directory.display()
            )));
        }

        Ok(Self {
            target_directory,
            file_system,
        })
    }

    /// Returns the directory this service truncates.
    #[must_use]
    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    /// Deletes the oldest files in the target directory until at most
    /// `max_files` remain. Individual deletion failures are logged and
    /// recorded in the report, never propagated.
    pub fn truncate_by_file_count(
        &self,
        max_files: i64,
        recursive: bool,
    ) -> AppResult<TruncationReport> {
        let retained = validate_limit(max_files)?;
        if recursive {
            return Err(AppError::Unsupported(
                "recursive file truncation is not implemented".to_owned(),
            ));
        }

        let entries = self.file_system.list_files(&self.target_directory)?;
        Ok(self.truncate_oldest(entries, retained, EntryKind::File))
    }

    /// Deletes the oldest immediate child directories of the target
    /// directory, each with its entire subtree, until at most
    /// `max_directories` remain.
    pub fn truncate_by_directory_count(&self, max_directories: i64) -> AppResult<TruncationReport> {
        let retained = validate_limit(max_directories)?;
        let entries = self.file_system.list_directories(&self.target_directory)?;
        Ok(self.truncate_oldest(entries, retained, EntryKind::Directory))
    }

    fn truncate_oldest(
        &self,
        mut entries: Vec<DirectoryEntry>,
        retained: usize,
        kind: EntryKind,
    ) -> TruncationReport {
        let examined = entries.len();
        let excess = examined.saturating_sub(retained);
        if excess == 0 {
            return TruncationReport {
                examined,
                excess: 0,
                outcomes: Vec::new(),
            };
        }

        // Stable sort: entries created in the same instant keep listing order.
        entries.sort_by_key(|entry| entry.created_at);

        info!(
            target_directory = %self.target_directory.display(),
            examined,
            excess,
            "removing oldest entries beyond the retention limit"
        );

        let outcomes = entries
            .into_iter()
            .take(excess)
            .map(|entry| self.delete_entry(entry, kind))
            .collect();

        TruncationReport {
            examined,
            excess,
            outcomes,
        }
    }

    fn delete_entry(&self, entry: DirectoryEntry, kind: EntryKind) -> DeletionOutcome {
        let result = match kind {
            EntryKind::File => self.file_system.delete_file(&entry.path),
            EntryKind::Directory => self.file_system.delete_directory(&entry.path),
        };

        let status = match result {
            Ok(()) => {
                info!(path = %entry.path.display(), "deleted entry");
                DeletionStatus::Deleted
            }
            Err(error) if error.is_not_found() => {
                warn!(path = %entry.path.display(), "entry vanished before deletion");
                DeletionStatus::AlreadyGone
            }
            Err(error) => {
                warn!(
                    path = %entry.path.display(),
                    error = %error,
                    "failed to delete entry"
                );
                DeletionStatus::Failed(error.to_string())
            }
        };

        DeletionOutcome {
            path: entry.path,
            status,
        }
    }
}

fn validate_limit(limit: i64) -> AppResult<usize> {
    usize::try_from(limit).map_err(|_| {
        AppError::Validation(format!("retention limit must be >= 0, got {limit}"))
    })
}
