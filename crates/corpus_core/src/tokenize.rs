//! Word extraction for the normalization stage.
//!
//! Text is lowercased, then every maximal run of letters from the language's
//! alphabet becomes a candidate token. Digits, punctuation and letters of
//! other scripts all act as separators.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords::StopwordSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Russian,
    English,
}

static RUSSIAN_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[а-яё]+").expect("literal russian token pattern is valid"));
static ENGLISH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z]+").expect("literal english token pattern is valid"));

impl Language {
    /// Pattern matching one lowercase token.
    fn token_pattern(self) -> &'static Regex {
        match self {
            Language::Russian => &*RUSSIAN_TOKEN,
            Language::English => &*ENGLISH_TOKEN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Russian => write!(f, "russian"),
            Language::English => write!(f, "english"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language {:?} (expected russian or english)", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" | "russian" => Ok(Language::Russian),
            "en" | "english" => Ok(Language::English),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: &'static Regex,
    stopwords: StopwordSet,
}

impl Tokenizer {
    pub fn new(language: Language, stopwords: StopwordSet) -> Self {
        Self {
            pattern: language.token_pattern(),
            stopwords,
        }
    }

    /// Tokenizer with the built-in stopword list for `language`.
    pub fn for_language(language: Language) -> Self {
        Self::new(language, StopwordSet::for_language(language))
    }

    /// All non-stopword tokens of `text` in order of appearance, repeats included.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.stopwords.contains(token))
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Distinct tokens across the whole corpus, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: BTreeSet<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_from_text(&mut self, tokenizer: &Tokenizer, text: &str) {
        self.tokens.extend(tokenizer.tokens(text));
    }

    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.tokens.insert(token.into())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// One token per line in lexicographic order, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            out.push_str(token);
            out.push('\n');
        }
        out
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}
