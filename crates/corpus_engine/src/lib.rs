//! Corpus engine: page retrieval, storage and corpus normalization IO.
mod crawl;
mod decode;
mod fetch;
mod normalize;
mod persist;
mod resolver;
mod scan;
mod seed_source;
mod types;

pub use crawl::{load_url_list, CrawlDriver, CrawlError, CrawlReport, CrawlSettings};
pub use decode::{charset_from_content_type, decode_body, DecodedText, DEFAULT_ENCODING};
pub use fetch::{
    is_html_content_type, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT,
};
pub use normalize::{
    collect_tokens, load_stopword_file, normalize_corpus, NormalizeError, NormalizeReport,
    NormalizeSettings,
};
pub use persist::{
    ensure_output_dir, remove_matching_files, split_target, AtomicFileWriter, PersistError,
};
pub use resolver::{
    DictionaryResolver, IdentityResolver, MorphResolver, ResolverError, SnowballStemmer,
};
pub use scan::{CorpusScanner, ScannedDocument};
pub use seed_source::{
    parse_random_titles, write_url_list, SeedError, SeedSource, WikipediaRandomSource, MAX_BATCH,
};
pub use types::{FetchError, FetchMetadata, FetchOutput};

