use std::collections::{BTreeMap, BTreeSet};

use crate::tokenize::TokenSet;

/// Maps a surface token to its canonical (dictionary) form.
///
/// Implementations must be total: every token yields some canonical form.
/// When the underlying analysis is ambiguous the resolver picks; callers do
/// not second-guess the choice.
pub trait LemmaResolver {
    fn canonical_form(&self, token: &str) -> String;
}

impl<R: LemmaResolver + ?Sized> LemmaResolver for &R {
    fn canonical_form(&self, token: &str) -> String {
        (**self).canonical_form(token)
    }
}

impl<R: LemmaResolver + ?Sized> LemmaResolver for Box<R> {
    fn canonical_form(&self, token: &str) -> String {
        (**self).canonical_form(token)
    }
}

/// Surface tokens grouped by canonical form.
///
/// Every token of the source set lands in exactly one group and no group is
/// empty. Lemmas and surface forms are both kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaGroups {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl LemmaGroups {
    pub fn build(tokens: &TokenSet, resolver: &dyn LemmaResolver) -> Self {
        let mut groups = Self::default();
        for token in tokens.iter() {
            groups.insert(resolver.canonical_form(token), token);
        }
        groups
    }

    pub fn insert(&mut self, lemma: String, token: &str) {
        self.groups
            .entry(lemma)
            .or_default()
            .insert(token.to_string());
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn forms(&self, lemma: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(lemma)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.groups
            .iter()
            .map(|(lemma, forms)| (lemma.as_str(), forms))
    }

    /// `<lemma> <form> <form> ...` per line, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (lemma, forms) in &self.groups {
            out.push_str(lemma);
            for form in forms {
                out.push(' ');
                out.push_str(form);
            }
            out.push('\n');
        }
        out
    }
}
