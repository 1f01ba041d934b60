//! Seed URL discovery.
//!
//! The crawl only needs a list of absolute URLs; [`WikipediaRandomSource`]
//! builds one from the MediaWiki random-article API.

use std::path::{Path, PathBuf};
use std::time::Duration;

use corpus_core::{render_url_list, title_to_url};
use corpus_logging::{corpus_info, corpus_warn};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::fetch::DEFAULT_USER_AGENT;
use crate::persist::{AtomicFileWriter, PersistError};

/// Largest `rnlimit` the API accepts for anonymous clients.
pub const MAX_BATCH: usize = 100;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid api url {0}")]
    InvalidApiUrl(String),
    #[error("seed request failed: {0}")]
    Request(String),
    #[error("seed request returned http status {0}")]
    HttpStatus(u16),
    #[error("unexpected api response: {0}")]
    Parse(String),
}

/// Produces absolute seed URLs for a crawl.
#[async_trait::async_trait]
pub trait SeedSource: Send + Sync {
    async fn seed_urls(&self, count: usize) -> Result<Vec<String>, SeedError>;
}

#[derive(Debug, Clone)]
pub struct WikipediaRandomSource {
    host: String,
    api_url: String,
    user_agent: String,
    timeout: Duration,
    batch_pause: Duration,
}

impl WikipediaRandomSource {
    /// Source for a wiki host such as `ru.wikipedia.org`.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            api_url: format!("https://{host}/w/api.php"),
            host,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            batch_pause: Duration::from_millis(300),
        }
    }

    /// Query a different API endpoint; article links still use the host.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    fn batch_url(&self, limit: usize) -> Result<Url, SeedError> {
        Url::parse_with_params(
            &self.api_url,
            &[
                ("action", "query".to_string()),
                ("list", "random".to_string()),
                ("rnnamespace", "0".to_string()),
                ("rnlimit", limit.to_string()),
                ("format", "json".to_string()),
            ],
        )
        .map_err(|_| SeedError::InvalidApiUrl(self.api_url.clone()))
    }

    async fn fetch_titles(&self, client: &reqwest::Client, limit: usize) -> Result<Vec<String>, SeedError> {
        let response = client
            .get(self.batch_url(limit)?)
            .send()
            .await
            .map_err(|err| SeedError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::HttpStatus(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| SeedError::Request(err.to_string()))?;
        parse_random_titles(&body)
    }
}

/// Titles from a `list=random` response body.
pub fn parse_random_titles(body: &[u8]) -> Result<Vec<String>, SeedError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| SeedError::Parse(err.to_string()))?;
    let items = value
        .get("query")
        .and_then(|query| query.get("random"))
        .and_then(Value::as_array)
        .ok_or_else(|| SeedError::Parse("missing query.random".into()))?;
    Ok(items
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str))
        .map(ToOwned::to_owned)
        .collect())
}

#[async_trait::async_trait]
impl SeedSource for WikipediaRandomSource {
    async fn seed_urls(&self, count: usize) -> Result<Vec<String>, SeedError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .map_err(|err| SeedError::Request(err.to_string()))?;

        corpus_info!("Requesting {} random articles from {}", count, self.host);
        let mut urls = Vec::with_capacity(count);
        while urls.len() < count {
            let limit = (count - urls.len()).min(MAX_BATCH);
            let titles = self.fetch_titles(&client, limit).await?;
            if titles.is_empty() {
                corpus_warn!("Random article batch came back empty; stopping at {}", urls.len());
                break;
            }
            for title in titles.into_iter().take(count - urls.len()) {
                match title_to_url(&self.host, &title) {
                    Some(url) => urls.push(url),
                    None => corpus_warn!("Cannot build a link for title {:?}", title),
                }
            }
            if urls.len() < count && !self.batch_pause.is_zero() {
                tokio::time::sleep(self.batch_pause).await;
            }
        }
        Ok(urls)
    }
}

/// Write seed URLs as a crawl list, one per line.
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<PathBuf, PersistError> {
    let (writer, name) = AtomicFileWriter::for_file(path)?;
    writer.write(&name, &render_url_list(urls))
}
