use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use corpus_core::{LemmaGroups, LemmaResolver, TokenSet, Tokenizer};
use corpus_logging::{corpus_debug, corpus_info};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::scan::CorpusScanner;

#[derive(Debug, Clone)]
pub struct NormalizeSettings {
    pub corpus_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tokens_filename: String,
    pub lemmas_filename: String,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("pages"),
            output_dir: PathBuf::from("."),
            tokens_filename: "tokens.txt".to_string(),
            lemmas_filename: "lemmas.txt".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("corpus directory {0:?} does not exist")]
    MissingCorpus(PathBuf),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    pub documents: usize,
    pub tokens: usize,
    pub lemmas: usize,
    pub tokens_path: PathBuf,
    pub lemmas_path: PathBuf,
}

/// Tokenize every document under the scanner's root into one corpus-wide set.
/// Returns the set and the number of documents read.
pub fn collect_tokens(scanner: &CorpusScanner, tokenizer: &Tokenizer) -> (TokenSet, usize) {
    let mut tokens = TokenSet::new();
    let mut documents = 0;
    for doc in scanner.documents() {
        corpus_debug!("Tokenizing {:?}", doc.path);
        tokens.extend_from_text(tokenizer, &doc.text);
        documents += 1;
    }
    (tokens, documents)
}

/// Build the vocabulary and lemma index for a stored corpus and write both.
pub fn normalize_corpus(
    settings: &NormalizeSettings,
    tokenizer: &Tokenizer,
    resolver: &dyn LemmaResolver,
) -> Result<NormalizeReport, NormalizeError> {
    if !settings.corpus_dir.is_dir() {
        return Err(NormalizeError::MissingCorpus(settings.corpus_dir.clone()));
    }

    let scanner = CorpusScanner::new(settings.corpus_dir.clone());
    let (tokens, documents) = collect_tokens(&scanner, tokenizer);
    let groups = LemmaGroups::build(&tokens, resolver);

    let writer = AtomicFileWriter::new(settings.output_dir.clone());
    let tokens_path = writer.write(&settings.tokens_filename, &tokens.render())?;
    let lemmas_path = writer.write(&settings.lemmas_filename, &groups.render())?;

    corpus_info!(
        "Done. Documents: {}, tokens: {}, lemmas: {}",
        documents,
        tokens.len(),
        groups.len()
    );
    corpus_info!("Output: {:?}, {:?}", tokens_path, lemmas_path);

    Ok(NormalizeReport {
        documents,
        tokens: tokens.len(),
        lemmas: groups.len(),
        tokens_path,
        lemmas_path,
    })
}

/// Extra stopwords, one per line; blank lines and `#` comments are ignored.
pub fn load_stopword_file(path: &Path) -> io::Result<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect())
}
