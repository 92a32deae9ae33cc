//! Listing page records.
//!
//! Wire shape:
//! `{ "metadata": { "current_page", "pages", "count", "next_url", ... },
//!    "results": [ { "index", "download_url", ... }, ... ] }`.
//! Required fields are enforced by serde at the parse boundary; unknown fields
//! are ignored.

use serde::Deserialize;

/// One listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    /// Absent (or null/empty on the wire) on the last page.
    pub next_url: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub items: Vec<Item>,
}

/// One downloadable measurement in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier; the output file stem.
    pub index: String,
    pub download_url: String,
    pub probe_cc: Option<String>,
    pub probe_asn: Option<String>,
    pub test_start_time: Option<String>,
}

impl Page {
    pub fn parse(body: &[u8]) -> Result<Page, serde_json::Error> {
        serde_json::from_slice::<WirePage>(body).map(Page::from)
    }
}

#[derive(Deserialize)]
struct WirePage {
    metadata: WireMetadata,
    results: Vec<WireItem>,
}

#[derive(Deserialize)]
struct WireMetadata {
    current_page: u64,
    pages: u64,
    count: u64,
    next_url: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

#[derive(Deserialize)]
struct WireItem {
    index: WireIndex,
    download_url: String,
    probe_cc: Option<String>,
    probe_asn: Option<String>,
    test_start_time: Option<String>,
}

/// The API has served both string and integer indexes.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireIndex {
    Text(String),
    Number(i64),
}

impl From<WireIndex> for String {
    fn from(index: WireIndex) -> Self {
        match index {
            WireIndex::Text(s) => s,
            WireIndex::Number(n) => n.to_string(),
        }
    }
}

impl From<WirePage> for Page {
    fn from(wire: WirePage) -> Self {
        let m = wire.metadata;
        Page {
            current_page: m.current_page,
            total_pages: m.pages,
            total_count: m.count,
            next_url: m.next_url.filter(|u| !u.is_empty()),
            limit: m.limit,
            offset: m.offset,
            items: wire
                .results
                .into_iter()
                .map(|r| Item {
                    index: r.index.into(),
                    download_url: r.download_url,
                    probe_cc: r.probe_cc,
                    probe_asn: r.probe_asn,
                    test_start_time: r.test_start_time,
                })
                .collect(),
        }
    }
}
