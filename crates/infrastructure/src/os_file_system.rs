//! Filesystem port implementation backed by the local OS.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use dirtrim_application::{DirectoryEntry, FileSystem};
use dirtrim_core::{AppError, AppResult};

/// Production filesystem adapter over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// Creates a new OS-backed filesystem adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, path: &Path) -> AppResult<Vec<DirectoryEntry>> {
        snapshot_entries(path, EntrySelector::Files)
    }

    fn list_directories(&self, path: &Path) -> AppResult<Vec<DirectoryEntry>> {
        snapshot_entries(path, EntrySelector::Directories)
    }

    fn delete_file(&self, path: &Path) -> AppResult<()> {
        fs::remove_file(path).map_err(|error| map_io_error(path, &error))
    }

    fn delete_directory(&self, path: &Path) -> AppResult<()> {
        fs::remove_dir_all(path).map_err(|error| map_io_error(path, &error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntrySelector {
    Files,
    Directories,
}

fn snapshot_entries(path: &Path, selector: EntrySelector) -> AppResult<Vec<DirectoryEntry>> {
    let read_dir = fs::read_dir(path).map_err(|error| map_io_error(path, &error))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|error| map_io_error(path, &error))?;
        let file_type = dir_entry
            .file_type()
            .map_err(|error| map_io_error(&dir_entry.path(), &error))?;

        let keep = match selector {
            EntrySelector::Files => file_type.is_file(),
            EntrySelector::Directories => file_type.is_dir(),
        };
        if !keep {
            continue;
        }

        let metadata = dir_entry
            .metadata()
            .map_err(|error| map_io_error(&dir_entry.path(), &error))?;
        // Not every filesystem records a birth time; fall back to the
        // modification time so ordering stays deterministic there.
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .map_err(|error| map_io_error(&dir_entry.path(), &error))?;

        entries.push(DirectoryEntry {
            path: dir_entry.path(),
            created_at: DateTime::<Utc>::from(created),
        });
    }

    Ok(entries)
}

fn map_io_error(path: &Path, error: &io::Error) -> AppError {
    if error.kind() == io::ErrorKind::NotFound {
        AppError::NotFound(format!("'{}' does not exist", path.display()))
    } else {
        AppError::Internal(format!(
            "filesystem operation on '{}' failed: {error}",
            path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use dirtrim_application::{FileSystem, TruncationService};

    use super::OsFileSystem;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn directory_exists_reports_only_real_directories() -> TestResult {
        let temp = tempfile::tempdir()?;
        let file_path = temp.path().join("entry.log");
        fs::write(&file_path, b"data")?;

        let adapter = OsFileSystem::new();

        assert!(adapter.directory_exists(temp.path()));
        assert!(!adapter.directory_exists(&temp.path().join("missing")));
        assert!(!adapter.directory_exists(&file_path));
        Ok(())
    }

    #[test]
    fn listings_separate_files_from_child_directories() -> TestResult {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("entry.log"), b"data")?;
        fs::create_dir(temp.path().join("child"))?;

        let adapter = OsFileSystem::new();

        let files = adapter.list_files(temp.path())?;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, temp.path().join("entry.log"));

        let directories = adapter.list_directories(temp.path())?;
        assert_eq!(directories.len(), 1);
        assert_eq!(directories[0].path, temp.path().join("child"));
        Ok(())
    }

    #[test]
    fn deleting_a_missing_file_maps_to_not_found() -> TestResult {
        let temp = tempfile::tempdir()?;
        let adapter = OsFileSystem::new();

        let result = adapter.delete_file(&temp.path().join("missing.log"));

        assert!(matches!(result, Err(error) if error.is_not_found()));
        Ok(())
    }

    #[test]
    fn delete_directory_removes_the_entire_subtree() -> TestResult {
        let temp = tempfile::tempdir()?;
        let child = temp.path().join("child");
        fs::create_dir_all(child.join("nested"))?;
        fs::write(child.join("nested").join("entry.log"), b"data")?;

        let adapter = OsFileSystem::new();
        adapter.delete_directory(&child)?;

        assert!(!child.exists());
        Ok(())
    }

    #[test]
    fn truncating_to_zero_empties_a_real_directory() -> TestResult {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("a.log"), b"a")?;
        fs::write(temp.path().join("b.log"), b"b")?;
        fs::create_dir(temp.path().join("kept-child"))?;

        let service = TruncationService::new(
            temp.path().display().to_string(),
            Arc::new(OsFileSystem::new()),
        )?;
        let report = service.truncate_by_file_count(0, false)?;

        assert_eq!(report.examined, 2);
        assert_eq!(report.deleted_count(), 2);
        assert_eq!(count_files(temp.path())?, 0);
        assert!(temp.path().join("kept-child").is_dir());
        Ok(())
    }

    fn count_files(path: &Path) -> Result<usize, std::io::Error> {
        let mut count = 0;
        for entry in fs::read_dir(path)? {
            if entry?.file_type()?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}
