use std::fs;
use std::sync::Once;

use corpus_core::{Language, LemmaGroups, LemmaResolver, StopwordSet, TokenSet, Tokenizer};
use corpus_engine::{
    collect_tokens, load_stopword_file, normalize_corpus, CorpusScanner, DictionaryResolver,
    IdentityResolver, MorphResolver, NormalizeError, NormalizeSettings, ResolverError,
    SnowballStemmer,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(corpus_logging::initialize_for_tests);
}

fn tokenizer(stopwords: &[&str]) -> Tokenizer {
    Tokenizer::new(Language::Russian, StopwordSet::from_words(stopwords))
}

fn write_corpus(temp: &TempDir) -> std::path::PathBuf {
    let pages = temp.path().join("pages");
    fs::create_dir_all(pages.join("nested")).unwrap();
    fs::write(pages.join("page_001.txt"), "<p>Коты и кошки. Кот спит.</p>").unwrap();
    fs::write(pages.join("page_002.txt"), "Кошки, КОТЫ и 2024 year").unwrap();
    fs::write(pages.join("nested").join("page_003.txt"), "Собака лает").unwrap();
    // Invalid UTF-8 between two words.
    fs::write(pages.join("page_004.bin"), b"\xff\xfe\xd0\xbb\xd0\xb5\xd1\x81 \xc3").unwrap();
    pages
}

#[test]
fn scanner_reads_every_file_recursively_and_lossily() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let pages = write_corpus(&temp);

    let scanner = CorpusScanner::new(pages);
    let mut docs: Vec<_> = scanner.documents().collect();
    docs.sort_by(|a, b| a.path.cmp(&b.path));

    assert_eq!(docs.len(), 4);
    let binary = docs
        .iter()
        .find(|doc| doc.path.ends_with("page_004.bin"))
        .unwrap();
    assert!(binary.text.contains("лес"));
    assert!(binary.text.contains('\u{FFFD}'));
}

#[test]
fn token_set_spans_all_documents() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let scanner = CorpusScanner::new(write_corpus(&temp));

    let (tokens, documents) = collect_tokens(&scanner, &tokenizer(&["и"]));

    assert_eq!(documents, 4);
    assert_eq!(
        tokens.render(),
        "кот\nкоты\nкошки\nлает\nлес\nсобака\nспит\n"
    );
}

#[test]
fn normalize_writes_vocabulary_and_lemma_index() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let pages = write_corpus(&temp);
    let out = temp.path().join("out");
    let settings = NormalizeSettings {
        corpus_dir: pages,
        output_dir: out.clone(),
        ..NormalizeSettings::default()
    };
    let resolver = DictionaryResolver::parse(
        "коты\tкот\nкошки\tкошка\nлает\tлаять\n",
        Box::new(IdentityResolver),
    )
    .unwrap();

    let report = normalize_corpus(&settings, &tokenizer(&["и"]), &resolver).unwrap();

    assert_eq!(report.documents, 4);
    assert_eq!(report.tokens, 7);
    assert_eq!(report.lemmas, 6);
    assert_eq!(
        fs::read_to_string(out.join("tokens.txt")).unwrap(),
        "кот\nкоты\nкошки\nлает\nлес\nсобака\nспит\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("lemmas.txt")).unwrap(),
        "кот кот коты\nкошка кошки\nлаять лает\nлес лес\nсобака собака\nспит спит\n"
    );
}

#[test]
fn missing_corpus_directory_is_reported() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let settings = NormalizeSettings {
        corpus_dir: temp.path().join("nope"),
        output_dir: temp.path().to_path_buf(),
        ..NormalizeSettings::default()
    };

    let err = normalize_corpus(&settings, &tokenizer(&[]), &IdentityResolver).unwrap_err();
    assert!(matches!(err, NormalizeError::MissingCorpus(_)));
    assert!(!temp.path().join("tokens.txt").exists());
}

#[test]
fn dictionary_misses_go_to_the_fallback() {
    let resolver =
        DictionaryResolver::parse("# form\tlemma\nШла\tИдти\n\n", Box::new(IdentityResolver))
            .unwrap();
    assert_eq!(resolver.len(), 1);
    assert_eq!(resolver.canonical_form("шла"), "идти");
    assert_eq!(resolver.canonical_form("река"), "река");
}

#[test]
fn dictionary_rejects_lines_without_a_lemma() {
    let err = DictionaryResolver::parse("шла\tидти\nрека\n", Box::new(IdentityResolver))
        .err()
        .unwrap();
    assert!(matches!(err, ResolverError::Malformed { line: 2 }));
}

#[test]
fn morph_resolver_returns_dictionary_forms() {
    let resolver = MorphResolver::russian();
    assert_eq!(resolver.canonical_form("москве"), "москва");
    assert_eq!(resolver.canonical_form("книги"), "книга");
    assert_eq!(resolver.canonical_form("бежал"), "бежать");
}

#[test]
fn morph_groups_inflections_under_the_dictionary_form() {
    init_logging();
    let tokenizer = Tokenizer::new(Language::Russian, StopwordSet::from_words(["и"]));
    let mut tokens = TokenSet::new();
    tokens.extend_from_text(&tokenizer, "Москва и в Москве книги");
    tokens.extend_from_text(&tokenizer, "москва");

    let groups = LemmaGroups::build(&tokens, &MorphResolver::russian());

    assert_eq!(groups.forms("москва").map(|forms| forms.len()), Some(2));
    assert!(groups.render().contains("книга книги\n"));
    assert!(groups.render().contains("москва москва москве\n"));
}

#[test]
fn snowball_stemmer_merges_inflections() {
    let resolver = SnowballStemmer::new(Language::Russian);
    assert_eq!(
        resolver.canonical_form("книга"),
        resolver.canonical_form("книги")
    );
    let english = SnowballStemmer::new(Language::English);
    assert_eq!(english.canonical_form("running"), "run");
}

#[test]
fn stopword_file_skips_comments_and_blanks() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("stop.txt");
    fs::write(&path, "# extra\nвики\n\n  правка  \n").unwrap();

    assert_eq!(
        load_stopword_file(&path).unwrap(),
        vec!["вики".to_string(), "правка".to_string()]
    );
}
