use std::fs;
use std::path::{Path, PathBuf};

use corpus_logging::corpus_warn;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDocument {
    pub path: PathBuf,
    pub text: String,
}

/// Reads every regular file below a directory as text.
#[derive(Debug, Clone)]
pub struct CorpusScanner {
    root: PathBuf,
}

impl CorpusScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields one document per file in traversal order. Invalid UTF-8
    /// is replaced with U+FFFD; unreadable entries are logged and skipped.
    pub fn documents(&self) -> impl Iterator<Item = ScannedDocument> + '_ {
        let root = &self.root;
        WalkDir::new(root)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    corpus_warn!("Skipping unreadable entry under {:?}: {}", root, err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.into_path();
                match fs::read(&path) {
                    Ok(bytes) => Some(ScannedDocument {
                        text: String::from_utf8_lossy(&bytes).into_owned(),
                        path,
                    }),
                    Err(err) => {
                        corpus_warn!("Skipping unreadable file {:?}: {}", path, err);
                        None
                    }
                }
            })
    }
}
