//! Sequential crawl over a URL list.
//!
//! Each URL is classified, fetched at most once and decoded. Successful pages
//! get the next document id and are stored as `page_NNN.txt`; the `id<TAB>url`
//! index is written once the list is exhausted. Pages left in the pages
//! directory by an earlier run are removed first, so the directory always
//! matches the index. Requests are throttled by a fixed pause between
//! consecutive URLs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use corpus_core::{
    page_filename, page_id, parse_url_list, render_index, should_skip_url, FetchOutcome,
    IdAllocator, IndexEntry, SkipReason,
};
use corpus_logging::{corpus_info, corpus_warn};
use thiserror::Error;

use crate::decode::decode_body;
use crate::fetch::Fetcher;
use crate::persist::{ensure_output_dir, remove_matching_files, AtomicFileWriter, PersistError};

#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub pages_dir: PathBuf,
    pub index_path: PathBuf,
    /// Pause between two consecutive URLs, whatever their outcome.
    pub delay: Duration,
    /// Fewer successes than this produce an advisory warning.
    pub min_documents: usize,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            index_path: PathBuf::from("index.txt"),
            delay: Duration::from_millis(800),
            min_documents: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("url list {0:?} not found")]
    MissingUrlList(PathBuf),
    #[error("url list {0:?} has no urls")]
    EmptyUrlList(PathBuf),
    #[error("failed to read url list {path:?}: {source}")]
    ReadUrlList { path: PathBuf, source: io::Error },
    #[error("no urls to crawl")]
    NoUrls,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Read and parse the URL list. A missing or empty list is fatal.
pub fn load_url_list(path: &Path) -> Result<Vec<String>, CrawlError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CrawlError::MissingUrlList(path.to_path_buf()));
        }
        Err(source) => {
            return Err(CrawlError::ReadUrlList {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let urls = parse_url_list(&raw);
    if urls.is_empty() {
        return Err(CrawlError::EmptyUrlList(path.to_path_buf()));
    }
    Ok(urls)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub processed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Stored pages in id order; the same entries as the index file.
    pub documents: Vec<IndexEntry>,
    pub index_path: PathBuf,
    pub below_minimum: bool,
}

pub struct CrawlDriver<'a> {
    fetcher: &'a dyn Fetcher,
    settings: CrawlSettings,
}

impl<'a> CrawlDriver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, settings: CrawlSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Produce the outcome for a single URL without storing anything.
    pub async fn process(&self, url: &str) -> FetchOutcome {
        if should_skip_url(url) {
            return FetchOutcome::Skipped(SkipReason::NonTextExtension);
        }
        match self.fetcher.fetch(url).await {
            Ok(output) => {
                let meta = &output.metadata;
                let decoded = decode_body(
                    &output.bytes,
                    meta.content_type.as_deref(),
                    meta.charset_hint.as_deref(),
                );
                if decoded.fell_back {
                    corpus_warn!(
                        "Unknown charset for {} (content type {:?}); decoded as {}",
                        url,
                        meta.content_type,
                        decoded.encoding_label
                    );
                }
                if decoded.had_replacements {
                    corpus_warn!(
                        "Replaced malformed {} sequences in {}",
                        decoded.encoding_label,
                        url
                    );
                }
                FetchOutcome::Success(decoded.text)
            }
            Err(err) => {
                corpus_info!("Fetch failed for {}: {}", url, err);
                FetchOutcome::Failed(err.kind)
            }
        }
    }

    /// Crawl `urls` in order and write the pages and the index.
    ///
    /// Per-URL failures are logged and counted; only output IO errors abort.
    pub async fn run(&self, urls: &[String]) -> Result<CrawlReport, CrawlError> {
        if urls.is_empty() {
            return Err(CrawlError::NoUrls);
        }
        ensure_output_dir(&self.settings.pages_dir)?;
        let stale = remove_matching_files(&self.settings.pages_dir, |name| {
            page_id(name).is_some()
        })?;
        if stale > 0 {
            corpus_info!(
                "Removed {} pages of a previous run from {:?}",
                stale,
                self.settings.pages_dir
            );
        }
        let pages = AtomicFileWriter::new(self.settings.pages_dir.clone());
        let (index_writer, index_name) = AtomicFileWriter::for_file(&self.settings.index_path)?;

        corpus_info!(
            "Crawling {} urls into {:?}, index {:?}",
            urls.len(),
            self.settings.pages_dir,
            self.settings.index_path
        );

        let mut ids = IdAllocator::new();
        let mut documents = Vec::new();
        let mut skipped = 0;
        let mut failed = 0;

        for (position, url) in urls.iter().enumerate() {
            if position > 0 && !self.settings.delay.is_zero() {
                tokio::time::sleep(self.settings.delay).await;
            }
            let ordinal = position + 1;

            match self.process(url).await {
                FetchOutcome::Success(text) => {
                    let id = ids.next_id();
                    let filename = page_filename(id);
                    pages.write(&filename, &text)?;
                    documents.push(IndexEntry {
                        id,
                        url: url.clone(),
                    });
                    corpus_info!("{}", stored_line(ordinal, documents.len(), &filename, url));
                }
                FetchOutcome::Skipped(reason) => {
                    skipped += 1;
                    corpus_info!("[{}] Skip: {} ({})", ordinal, url, reason);
                }
                FetchOutcome::Failed(kind) => {
                    failed += 1;
                    corpus_info!("[{}] Skip: {} ({})", ordinal, url, kind);
                }
            }
        }

        let index_path = index_writer.write(&index_name, &render_index(&documents))?;

        let succeeded = documents.len();
        let below_minimum = succeeded < self.settings.min_documents;
        corpus_info!(
            "Done. Stored {} pages ({} skipped, {} failed). Index: {:?}",
            succeeded,
            skipped,
            failed,
            index_path
        );
        if below_minimum {
            corpus_warn!(
                "Only {} pages stored; at least {} are wanted. Add urls to the list and run again.",
                succeeded,
                self.settings.min_documents
            );
        }

        Ok(CrawlReport {
            processed: urls.len(),
            succeeded,
            skipped,
            failed,
            documents,
            index_path,
            below_minimum,
        })
    }
}

/// Progress line for a stored page: input position, successes so far, file and source.
fn stored_line(ordinal: usize, stored: usize, filename: &str, url: &str) -> String {
    format!("[{ordinal}] OK #{stored}: {filename} <- {url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_line_reports_running_success_count() {
        assert_eq!(
            stored_line(5, 3, "page_003.txt", "https://example.org/c"),
            "[5] OK #3: page_003.txt <- https://example.org/c"
        );
    }
}
