//! Run configuration, optionally loaded from a RON file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command line flags are applied on top.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use corpus_core::{Language, LemmaResolver, StopwordSet, Tokenizer};
use corpus_engine::{
    load_stopword_file, CrawlSettings, DictionaryResolver, FetchSettings, IdentityResolver,
    MorphResolver, NormalizeSettings, SnowballStemmer, WikipediaRandomSource, DEFAULT_USER_AGENT,
};
use corpus_logging::{corpus_warn, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub url_list: PathBuf,
    pub pages_dir: PathBuf,
    pub index_path: PathBuf,
    pub output_dir: PathBuf,
    pub fetch: FetchConfig,
    pub crawl: CrawlConfig,
    pub seed: SeedConfig,
    pub normalize: NormalizeConfig,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url_list: PathBuf::from("urls.txt"),
            pages_dir: PathBuf::from("pages"),
            index_path: PathBuf::from("index.txt"),
            output_dir: PathBuf::from("."),
            fetch: FetchConfig::default(),
            crawl: CrawlConfig::default(),
            seed: SeedConfig::default(),
            normalize: NormalizeConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub delay_ms: u64,
    pub min_documents: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            delay_ms: 800,
            min_documents: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub host: String,
    pub count: usize,
    pub batch_pause_ms: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            host: "ru.wikipedia.org".to_string(),
            count: 100,
            batch_pause_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Dictionary form from the morphological analyzer (russian only).
    Morph,
    /// Snowball stem.
    Stemmer,
    /// `form<TAB>lemma` table, falling back to `morph` or `stemmer`.
    Dictionary,
    Identity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub language: String,
    pub stopword_file: Option<PathBuf>,
    pub resolver: ResolverKind,
    pub dictionary: Option<PathBuf>,
    pub tokens_filename: String,
    pub lemmas_filename: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        let defaults = NormalizeSettings::default();
        Self {
            language: Language::default().to_string(),
            stopword_file: None,
            resolver: ResolverKind::Morph,
            dictionary: None,
            tokens_filename: defaults.tokens_filename,
            lemmas_filename: defaults.lemmas_filename,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogTarget,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::Terminal,
            level: "info".to_string(),
            file: PathBuf::from("corpus.log"),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.level
            .parse()
            .with_context(|| format!("invalid log level {:?}", self.level))
    }
}

impl AppConfig {
    /// Defaults, or the given RON file layered over them.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        ron::from_str(&content).with_context(|| format!("failed to parse config {:?}", path))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.fetch.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
        }
    }

    pub fn crawl_settings(&self) -> CrawlSettings {
        CrawlSettings {
            pages_dir: self.pages_dir.clone(),
            index_path: self.index_path.clone(),
            delay: Duration::from_millis(self.crawl.delay_ms),
            min_documents: self.crawl.min_documents,
        }
    }

    pub fn normalize_settings(&self) -> NormalizeSettings {
        NormalizeSettings {
            corpus_dir: self.pages_dir.clone(),
            output_dir: self.output_dir.clone(),
            tokens_filename: self.normalize.tokens_filename.clone(),
            lemmas_filename: self.normalize.lemmas_filename.clone(),
        }
    }

    pub fn seed_source(&self) -> WikipediaRandomSource {
        WikipediaRandomSource::new(self.seed.host.clone())
            .with_user_agent(self.fetch.user_agent.clone())
            .with_timeout(Duration::from_secs(self.fetch.request_timeout_secs))
            .with_batch_pause(Duration::from_millis(self.seed.batch_pause_ms))
    }

    pub fn language(&self) -> anyhow::Result<Language> {
        Ok(self.normalize.language.parse::<Language>()?)
    }

    /// Built-in stopwords for the language plus the optional extra list.
    pub fn tokenizer(&self) -> anyhow::Result<Tokenizer> {
        let language = self.language()?;
        let mut stopwords = StopwordSet::for_language(language);
        if let Some(path) = &self.normalize.stopword_file {
            let extra = load_stopword_file(path)
                .with_context(|| format!("failed to read stopword file {:?}", path))?;
            stopwords.extend(extra);
        }
        Ok(Tokenizer::new(language, stopwords))
    }

    pub fn resolver(&self) -> anyhow::Result<Box<dyn LemmaResolver>> {
        let language = self.language()?;
        let resolver: Box<dyn LemmaResolver> = match self.normalize.resolver {
            ResolverKind::Identity => Box::new(IdentityResolver),
            ResolverKind::Stemmer => Box::new(SnowballStemmer::new(language)),
            ResolverKind::Morph => base_resolver(language),
            ResolverKind::Dictionary => {
                let Some(path) = &self.normalize.dictionary else {
                    bail!("the dictionary resolver needs a dictionary file");
                };
                Box::new(DictionaryResolver::from_file(
                    path,
                    base_resolver(language),
                )?)
            }
        };
        Ok(resolver)
    }
}

/// The morphological analyzer where one exists for `language`, otherwise
/// the stemmer.
fn base_resolver(language: Language) -> Box<dyn LemmaResolver> {
    match language {
        Language::Russian => Box::new(MorphResolver::russian()),
        other => {
            corpus_warn!("No morphological dictionary for {}; using the stemmer", other);
            Box::new(SnowballStemmer::new(other))
        }
    }
}
