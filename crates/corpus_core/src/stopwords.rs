//! Stopword lists for the supported corpus languages.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use crate::tokenize::Language;

/// A set of lowercase high-frequency words excluded from the vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The built-in NLTK list for `language`: function words only.
    pub fn for_language(language: Language) -> Self {
        let lang = match language {
            Language::Russian => LANGUAGE::Russian,
            Language::English => LANGUAGE::English,
        };
        Self::from_words(get(lang))
    }

    /// An empty set (nothing is filtered).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Add words to the set. Blank entries are ignored.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_lowercase());
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
