//! Canonical-form resolvers backing the lemma index.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use corpus_core::{Language, LemmaResolver};
use rsmorphy::prelude::*;
use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("failed to read lemma dictionary {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("lemma dictionary line {line}: expected `form<TAB>lemma`")]
    Malformed { line: usize },
}

/// Every token is its own canonical form.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityResolver;

impl LemmaResolver for IdentityResolver {
    fn canonical_form(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Dictionary form of a Russian word from an OpenCorpora-based
/// morphological analyzer: the normal form of its first parse.
pub struct MorphResolver {
    analyzer: MorphAnalyzer,
}

impl MorphResolver {
    /// Load the bundled Russian dictionary.
    pub fn russian() -> Self {
        Self {
            analyzer: MorphAnalyzer::from_file(rsmorphy_dict_ru::DICT_PATH),
        }
    }
}

impl LemmaResolver for MorphResolver {
    fn canonical_form(&self, token: &str) -> String {
        match self.analyzer.parse(token).first() {
            Some(parsed) => parsed.lex.get_normal_form(&self.analyzer).to_string(),
            None => token.to_string(),
        }
    }
}

/// Snowball stem as the canonical form. Stems are not always words:
/// "москва" becomes "москв".
pub struct SnowballStemmer {
    stemmer: Stemmer,
}

impl SnowballStemmer {
    pub fn new(language: Language) -> Self {
        let algorithm = match language {
            Language::Russian => Algorithm::Russian,
            Language::English => Algorithm::English,
        };
        Self {
            stemmer: Stemmer::create(algorithm),
        }
    }
}

impl LemmaResolver for SnowballStemmer {
    fn canonical_form(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }
}

/// Lemmas looked up from a `form<TAB>lemma` table. Forms missing from the
/// table are handed to the fallback resolver.
pub struct DictionaryResolver {
    table: HashMap<String, String>,
    fallback: Box<dyn LemmaResolver>,
}

impl DictionaryResolver {
    /// Parse the table. Blank lines and `#` comments are ignored; both
    /// columns are lowercased.
    pub fn parse(raw: &str, fallback: Box<dyn LemmaResolver>) -> Result<Self, ResolverError> {
        let mut table = HashMap::new();
        for (index, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, lemma) = line
                .split_once('\t')
                .map(|(form, lemma)| (form.trim(), lemma.trim()))
                .filter(|(form, lemma)| !form.is_empty() && !lemma.is_empty())
                .ok_or(ResolverError::Malformed { line: index + 1 })?;
            table.insert(form.to_lowercase(), lemma.to_lowercase());
        }
        Ok(Self { table, fallback })
    }

    pub fn from_file(path: &Path, fallback: Box<dyn LemmaResolver>) -> Result<Self, ResolverError> {
        let raw = fs::read_to_string(path).map_err(|source| ResolverError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, fallback)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl LemmaResolver for DictionaryResolver {
    fn canonical_form(&self, token: &str) -> String {
        match self.table.get(token) {
            Some(lemma) => lemma.clone(),
            None => self.fallback.canonical_form(token),
        }
    }
}
