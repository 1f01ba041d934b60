use std::fmt;

/// Sequential id of a stored page. Ids start at 1 and have no gaps.
pub type DocId = u32;

/// One line of the crawl index: which URL a stored page came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: DocId,
    pub url: String,
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.url)
    }
}

/// Render index entries as `<id>\t<url>` lines, each newline-terminated.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}

/// Parse an index file back into entries. Lines that are not `<id>\t<url>`
/// are ignored.
pub fn parse_index(raw: &str) -> Vec<IndexEntry> {
    raw.lines()
        .filter_map(|line| {
            let (id, url) = line.split_once('\t')?;
            let id = id.trim().parse::<DocId>().ok()?;
            Some(IndexEntry {
                id,
                url: url.to_string(),
            })
        })
        .collect()
}

/// File name of the stored page with the given id: `page_001.txt`.
pub fn page_filename(id: DocId) -> String {
    format!("page_{id:03}.txt")
}

/// Id of a stored page file name, if `name` is one.
pub fn page_id(name: &str) -> Option<DocId> {
    let digits = name.strip_prefix("page_")?.strip_suffix(".txt")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Hands out document ids in crawl order.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: DocId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> DocId {
        self.last += 1;
        self.last
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> DocId {
        self.last
    }
}
