/// File suffixes that never carry page text.
pub const SKIP_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".woff", ".woff2", ".pdf",
];

/// Returns true when the URL points at a script, stylesheet, image, font or
/// document by extension and should be skipped without a request.
///
/// The query string is ignored and the comparison is case-insensitive.
pub fn should_skip_url(url: &str) -> bool {
    let without_query = url.split('?').next().unwrap_or(url);
    let lower = without_query.to_lowercase();
    SKIP_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
