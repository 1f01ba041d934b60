//! Corpus core: pure crawl bookkeeping and text normalization.
mod classify;
mod index;
mod lemma;
mod outcome;
mod seeds;
mod stopwords;
mod tokenize;

pub use classify::{should_skip_url, SKIP_EXTENSIONS};
pub use index::{
    page_filename, page_id, parse_index, render_index, DocId, IdAllocator, IndexEntry,
};
pub use lemma::{LemmaGroups, LemmaResolver};
pub use outcome::{FailureKind, FetchOutcome, SkipReason};
pub use seeds::{parse_url_list, render_url_list, title_to_url};
pub use stopwords::StopwordSet;
pub use tokenize::{Language, TokenSet, Tokenizer, UnknownLanguage};
