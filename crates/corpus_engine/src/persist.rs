use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} missing or not writable: {message}")]
    OutputDir { path: PathBuf, message: String },
    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to remove {path:?}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |message: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        message,
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| dir_error(e.to_string()))?;
        if !meta.is_dir() {
            return Err(dir_error("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| dir_error(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| dir_error(e.to_string()))?;
    Ok(())
}

/// Delete the files in `dir` whose names match `matches`. Subdirectories
/// and other files are left alone. Returns how many files were removed.
pub fn remove_matching_files(
    dir: &Path,
    matches: impl Fn(&str) -> bool,
) -> Result<usize, PersistError> {
    let entries = fs::read_dir(dir).map_err(|e| PersistError::OutputDir {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| PersistError::OutputDir {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        let is_match = entry.file_name().to_str().is_some_and(|name| matches(name));
        if !is_match || !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(|source| PersistError::Remove {
            path: path.clone(),
            source,
        })?;
        removed += 1;
    }
    Ok(removed)
}

/// Split a file path into the directory that holds it and its file name.
/// A bare file name lives in the current directory.
pub fn split_target(path: &Path) -> Option<(PathBuf, String)> {
    let name = path.file_name()?.to_str()?.to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, name))
}

/// Writes whole files into one directory, each through a temp file that is
/// renamed over the target so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writer for the directory that holds `path`, plus the file name to use.
    pub fn for_file(path: &Path) -> Result<(Self, String), PersistError> {
        let (dir, name) = split_target(path).ok_or_else(|| PersistError::OutputDir {
            path: path.to_path_buf(),
            message: "path has no file name".into(),
        })?;
        Ok((Self::new(dir), name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let write_error = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        tmp.write_all(content.as_bytes()).map_err(write_error)?;
        tmp.flush().map_err(write_error)?;
        tmp.as_file_mut().sync_all().map_err(write_error)?;

        // Replace existing file if present so reruns produce the same tree.
        if target.exists() {
            fs::remove_file(&target).map_err(write_error)?;
        }
        tmp.persist(&target).map_err(|e| write_error(e.error))?;
        Ok(target)
    }
}
