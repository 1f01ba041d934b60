use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use corpus_engine::{
    load_url_list, normalize_corpus, write_url_list, CrawlDriver, ReqwestFetcher, SeedSource,
};
use corpus_logging::{corpus_info, corpus_warn};

use crate::config::{AppConfig, LogTarget, ResolverKind};

/// Fetch a batch of pages, then build a token vocabulary and lemma index.
#[derive(Parser, Debug)]
#[command(name = "corpus", version)]
pub struct Cli {
    /// RON config file; flags override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Where log output goes.
    #[arg(long, global = true, value_enum)]
    pub log_to: Option<LogTarget>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a URL list of random wiki articles.
    Seed(SeedArgs),
    /// Fetch every URL in the list and store pages plus the index.
    Crawl(CrawlArgs),
    /// Build tokens.txt and lemmas.txt from stored pages.
    Normalize(NormalizeCmdArgs),
    /// Crawl, then normalize the pages just stored.
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub struct SeedArgs {
    /// Number of article URLs to collect.
    #[arg(long)]
    pub count: Option<usize>,
    /// Wiki host, e.g. ru.wikipedia.org.
    #[arg(long)]
    pub host: Option<String>,
    /// URL list file to write.
    #[arg(long)]
    pub urls: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct CrawlArgs {
    /// URL list file to read.
    #[arg(long)]
    pub urls: Option<PathBuf>,
    /// Directory for stored pages.
    #[arg(long)]
    pub pages: Option<PathBuf>,
    /// Index file to write.
    #[arg(long)]
    pub index: Option<PathBuf>,
    /// Pause between requests in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct NormalizeArgs {
    /// Directory for tokens.txt and lemmas.txt.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Corpus language (russian, english).
    #[arg(long)]
    pub language: Option<String>,
    /// How canonical forms are resolved.
    #[arg(long, value_enum)]
    pub resolver: Option<ResolverKind>,
    /// `form<TAB>lemma` file for the dictionary resolver.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
    /// Extra stopwords, one per line.
    #[arg(long)]
    pub stopwords: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct NormalizeCmdArgs {
    /// Directory of stored pages to read.
    #[arg(long)]
    pub pages: Option<PathBuf>,
    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub crawl: CrawlArgs,
    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

impl SeedArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(count) = self.count {
            config.seed.count = count;
        }
        if let Some(host) = &self.host {
            config.seed.host = host.clone();
        }
        if let Some(urls) = &self.urls {
            config.url_list = urls.clone();
        }
    }
}

impl CrawlArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(urls) = &self.urls {
            config.url_list = urls.clone();
        }
        if let Some(pages) = &self.pages {
            config.pages_dir = pages.clone();
        }
        if let Some(index) = &self.index {
            config.index_path = index.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.crawl.delay_ms = delay_ms;
        }
    }
}

impl NormalizeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(out) = &self.out {
            config.output_dir = out.clone();
        }
        if let Some(language) = &self.language {
            config.normalize.language = language.clone();
        }
        if let Some(resolver) = self.resolver {
            config.normalize.resolver = resolver;
        }
        if let Some(dictionary) = &self.dictionary {
            config.normalize.dictionary = Some(dictionary.clone());
        }
        if let Some(stopwords) = &self.stopwords {
            config.normalize.stopword_file = Some(stopwords.clone());
        }
    }
}

impl Cli {
    /// Config file values with this invocation's flags applied.
    pub fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if let Some(target) = self.log_to {
            config.log.destination = target;
        }
        match &self.command {
            Command::Seed(args) => args.apply(&mut config),
            Command::Crawl(args) => args.apply(&mut config),
            Command::Normalize(args) => {
                if let Some(pages) = &args.pages {
                    config.pages_dir = pages.clone();
                }
                args.normalize.apply(&mut config);
            }
            Command::Run(args) => {
                args.crawl.apply(&mut config);
                args.normalize.apply(&mut config);
            }
        }
        Ok(config)
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.resolve_config()?;
        corpus_logging::initialize(
            config.log.destination.into(),
            config.log.level_filter()?,
            &config.log.file,
        );

        match &self.command {
            Command::Seed(_) => run_seed(&config),
            Command::Crawl(_) => run_crawl(&config),
            Command::Normalize(_) => run_normalize(&config),
            Command::Run(_) => {
                run_crawl(&config)?;
                run_normalize(&config)
            }
        }
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to start tokio runtime")
}

fn run_seed(config: &AppConfig) -> anyhow::Result<()> {
    let source = config.seed_source();
    let urls = runtime()?.block_on(source.seed_urls(config.seed.count))?;
    if urls.len() < config.seed.count {
        corpus_warn!(
            "Collected {} of {} requested urls",
            urls.len(),
            config.seed.count
        );
    }
    let path = write_url_list(&config.url_list, &urls)?;
    corpus_info!("Saved {} urls to {:?}", urls.len(), path);
    Ok(())
}

fn run_crawl(config: &AppConfig) -> anyhow::Result<()> {
    let urls = load_url_list(&config.url_list)?;
    let fetcher = ReqwestFetcher::new(config.fetch_settings());
    let driver = CrawlDriver::new(&fetcher, config.crawl_settings());
    let report = runtime()?.block_on(driver.run(&urls))?;
    println!(
        "Stored {} of {} pages ({} skipped, {} failed). Index: {}",
        report.succeeded,
        report.processed,
        report.skipped,
        report.failed,
        report.index_path.display()
    );
    Ok(())
}

fn run_normalize(config: &AppConfig) -> anyhow::Result<()> {
    let tokenizer = config.tokenizer()?;
    let resolver = config.resolver()?;
    let report = normalize_corpus(&config.normalize_settings(), &tokenizer, resolver.as_ref())?;
    println!(
        "Tokens: {}, lemmas: {} from {} documents. Output: {}, {}",
        report.tokens,
        report.lemmas,
        report.documents,
        report.tokens_path.display(),
        report.lemmas_path.display()
    );
    Ok(())
}
