//! Pagination walker: follow `next_url` links and save every item payload.

use std::io;
use std::path::{Path, PathBuf};

use crate::backoff::Sleeper;
use crate::fetch::{FetchExhausted, Fetcher};
use crate::http::Transport;
use crate::output::{file_stem_for_index, OutputDir};
use crate::page::Page;
use crate::progress::{Progress, ProgressEvent};

/// Fatal walk error. Any of these stops the run.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error(transparent)]
    Fetch(#[from] FetchExhausted),
    #[error("response from {url} did not comply with the expected format: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("item index {index:?} listed by {url} is not usable as a file name")]
    InvalidIndex { url: String, index: String },
    #[error("failed to write {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Totals for a completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub pages: u64,
    pub items: u64,
}

/// Walks the listing starting at `start_url` and writes each item payload to
/// `<output_dir>/<index>.json`.
///
/// The loop advances on `next_url` alone, so an empty page still moves on and
/// the walk ends right after the items of the first page without a next link.
pub fn walk<T: Transport, S: Sleeper>(
    fetcher: &mut Fetcher<T, S>,
    start_url: &str,
    output_dir: &Path,
    progress: &mut dyn Progress,
) -> Result<WalkSummary, WalkError> {
    let output = OutputDir::prepare(output_dir).map_err(|source| WalkError::Storage {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut summary = WalkSummary::default();
    let mut current_url = Some(start_url.to_string());

    while let Some(url) = current_url.take() {
        let resp = fetcher.fetch(&url, progress)?;
        let page = Page::parse(&resp.body).map_err(|source| WalkError::MalformedResponse {
            url: url.clone(),
            source,
        })?;
        summary.pages += 1;
        progress.report(ProgressEvent::Page {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_count: page.total_count,
        });
        tracing::info!(
            url = %url,
            page = page.current_page,
            pages = page.total_pages,
            items = page.items.len(),
            limit = ?page.limit,
            offset = ?page.offset,
            next = page.next_url.as_deref().unwrap_or("-"),
            "listing page"
        );

        current_url = page.next_url;

        for item in &page.items {
            let stem = file_stem_for_index(&item.index).ok_or_else(|| WalkError::InvalidIndex {
                url: url.clone(),
                index: item.index.clone(),
            })?;
            let payload = fetcher.fetch(&item.download_url, progress)?;
            let path = output.write_item(stem, &payload.body).map_err(|source| {
                WalkError::Storage {
                    path: output.item_path(stem),
                    source,
                }
            })?;
            summary.items += 1;
            progress.report(ProgressEvent::Item {
                index: &item.index,
                path: &path,
            });
            tracing::debug!(
                index = %item.index,
                probe_cc = item.probe_cc.as_deref().unwrap_or("-"),
                probe_asn = item.probe_asn.as_deref().unwrap_or("-"),
                test_start_time = item.test_start_time.as_deref().unwrap_or("-"),
                bytes = payload.body.len(),
                "saved {}",
                path.display()
            );
        }
    }

    tracing::info!(pages = summary.pages, items = summary.items, "walk complete");
    Ok(summary)
}
