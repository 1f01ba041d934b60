use corpus_engine::decode_body;
use pretty_assertions::assert_eq;

const PRIVET_CP1251: &[u8] = b"\xcf\xf0\xe8\xe2\xe5\xf2";
const PRIVET_KOI8R: &[u8] = b"\xd0\xd2\xc9\xd7\xc5\xd4";

#[test]
fn content_type_charset_selects_windows_1251() {
    let decoded = decode_body(PRIVET_CP1251, Some("text/html; charset=windows-1251"), None);
    assert_eq!(decoded.text, "Привет");
    assert_eq!(decoded.encoding_label, "windows-1251");
    assert!(!decoded.fell_back);
    assert!(!decoded.had_replacements);
}

#[test]
fn transport_hint_is_used_when_content_type_has_no_charset() {
    let decoded = decode_body(PRIVET_KOI8R, Some("text/html"), Some("koi8-r"));
    assert_eq!(decoded.text, "привет");
    assert_eq!(decoded.encoding_label, "KOI8-R");
}

#[test]
fn content_type_charset_wins_over_transport_hint() {
    let decoded = decode_body(
        PRIVET_CP1251,
        Some("text/html; charset=windows-1251"),
        Some("koi8-r"),
    );
    assert_eq!(decoded.text, "Привет");
}

#[test]
fn default_is_utf8_when_nothing_is_declared() {
    let decoded = decode_body("Москва".as_bytes(), Some("text/html"), None);
    assert_eq!(decoded.text, "Москва");
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert!(!decoded.fell_back);
}

#[test]
fn unknown_charset_falls_back_to_default_on_the_same_bytes() {
    let decoded = decode_body(
        "Москва".as_bytes(),
        Some("text/html; charset=x-no-such-encoding"),
        None,
    );
    assert_eq!(decoded.text, "Москва");
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert!(decoded.fell_back);
}

#[test]
fn malformed_bytes_are_replaced_not_fatal() {
    let decoded = decode_body(PRIVET_CP1251, Some("text/html"), None);
    assert!(decoded.had_replacements);
    assert!(decoded.text.contains('\u{FFFD}'));
}

#[test]
fn declared_charset_wins_over_utf8_bom() {
    let decoded = decode_body(
        b"\xEF\xBB\xBFhello",
        Some("text/html; charset=windows-1251"),
        None,
    );
    assert_eq!(decoded.text, "п»їhello");
    assert_eq!(decoded.encoding_label, "windows-1251");
    assert!(!decoded.had_replacements);
}

#[test]
fn utf8_bom_is_kept_as_text_under_utf8() {
    let decoded = decode_body(b"\xEF\xBB\xBFhello", Some("text/html; charset=utf-8"), None);
    assert_eq!(decoded.text, "\u{feff}hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}
