use encoding_rs::{Encoding, UTF_8_INIT};

/// Encoding used when nothing usable is declared.
pub static DEFAULT_ENCODING: &Encoding = &UTF_8_INIT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Name of the encoding the text was actually decoded with.
    pub encoding_label: String,
    /// A charset was declared but not recognized; the default was used instead.
    pub fell_back: bool,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_replacements: bool,
}

/// Decode a response body. Never fails.
///
/// The encoding is chosen from the `charset=` parameter of the content type,
/// then the transport charset hint, then [`DEFAULT_ENCODING`]. An unknown
/// label decodes the same bytes with the default. A byte order mark does not
/// change the chosen encoding; it is decoded like any other bytes.
pub fn decode_body(
    bytes: &[u8],
    content_type: Option<&str>,
    charset_hint: Option<&str>,
) -> DecodedText {
    let declared = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_hint.map(|hint| hint.trim().to_string()))
        .filter(|label| !label.is_empty());

    let (encoding, fell_back) = match declared {
        Some(label) => match Encoding::for_label(label.as_bytes()) {
            Some(enc) => (enc, false),
            None => (DEFAULT_ENCODING, true),
        },
        None => (DEFAULT_ENCODING, false),
    };

    let (text, had_replacements) = encoding.decode_without_bom_handling(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding_label: encoding.name().to_string(),
        fell_back,
        had_replacements,
    }
}

/// Extract the `charset` parameter from a content type header value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            if !key.trim().eq_ignore_ascii_case("charset") {
                return None;
            }
            let value = value.trim().trim_matches(&['"', '\''][..]).trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .next()
}
