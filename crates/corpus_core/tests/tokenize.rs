use std::sync::Once;

use corpus_core::{Language, StopwordSet, TokenSet, Tokenizer};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(corpus_logging::initialize_for_tests);
}

fn russian(stopwords: &[&str]) -> Tokenizer {
    Tokenizer::new(Language::Russian, StopwordSet::from_words(stopwords))
}

#[test]
fn case_and_repetition_collapse_to_one_token() {
    init_logging();
    let tokenizer = russian(&["и", "в"]);
    let mut set = TokenSet::new();
    set.extend_from_text(&tokenizer, "Привет привет ПРИВЕТ");

    assert_eq!(set.len(), 1);
    assert!(set.contains("привет"));
}

#[test]
fn stopword_only_text_yields_nothing() {
    init_logging();
    let tokenizer = russian(&["и", "в", "на", "не"]);
    let mut set = TokenSet::new();
    set.extend_from_text(&tokenizer, "И в НА, не... и!");

    assert!(set.is_empty());
}

#[test]
fn builtin_list_filters_common_function_words() {
    init_logging();
    let tokenizer = Tokenizer::for_language(Language::Russian);
    let tokens = tokenizer.tokens("Москва и Петербург");

    assert_eq!(tokens, vec!["москва".to_string(), "петербург".to_string()]);
}

#[test]
fn digits_punctuation_and_latin_split_runs() {
    init_logging();
    let tokenizer = russian(&[]);
    let tokens = tokenizer.tokens("в2020году,Wikipedia-статья «ёлка»");

    assert_eq!(
        tokens,
        vec![
            "в".to_string(),
            "году".to_string(),
            "статья".to_string(),
            "ёлка".to_string()
        ]
    );
}

#[test]
fn yo_is_part_of_the_alphabet_and_folds_case() {
    init_logging();
    let tokenizer = russian(&[]);
    assert_eq!(tokenizer.tokens("ЁЖИК"), vec!["ёжик".to_string()]);
}

#[test]
fn english_alphabet_ignores_cyrillic() {
    init_logging();
    let tokenizer = Tokenizer::new(Language::English, StopwordSet::from_words(["the"]));
    let tokens = tokenizer.tokens("The Moscow (Москва) metro");

    assert_eq!(tokens, vec!["moscow".to_string(), "metro".to_string()]);
}

#[test]
fn token_set_is_global_across_documents() {
    init_logging();
    let tokenizer = russian(&[]);
    let mut set = TokenSet::new();
    set.extend_from_text(&tokenizer, "кот пёс");
    set.extend_from_text(&tokenizer, "пёс кот мышь");

    assert_eq!(set.render(), "кот\nмышь\nпёс\n");
}

#[test]
fn language_parses_short_and_long_names() {
    assert_eq!("ru".parse::<Language>().unwrap(), Language::Russian);
    assert_eq!("English".parse::<Language>().unwrap(), Language::English);
    assert!("klingon".parse::<Language>().is_err());
}
