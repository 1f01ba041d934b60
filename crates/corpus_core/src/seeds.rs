use url::Url;

/// Parse a newline-delimited URL list.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. The order of
/// the remaining lines is the crawl order.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

/// Render URLs as a list file, one per line with a trailing newline.
pub fn render_url_list(urls: &[String]) -> String {
    let mut out = String::new();
    for url in urls {
        out.push_str(url);
        out.push('\n');
    }
    out
}

/// Build a wiki article link from its title, e.g. `Новый Орлеан` on
/// `ru.wikipedia.org` becomes `https://ru.wikipedia.org/wiki/Новый_Орлеан`
/// with the path percent-encoded. Slashes in the title stay path separators.
pub fn title_to_url(host: &str, title: &str) -> Option<String> {
    let mut url = Url::parse(&format!("https://{host}/wiki")).ok()?;
    let underscored = title.replace(' ', "_");
    {
        let mut segments = url.path_segments_mut().ok()?;
        for segment in underscored.split('/') {
            segments.push(segment);
        }
    }
    Some(url.to_string())
}
