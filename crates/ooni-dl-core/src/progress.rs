//! Progress notices emitted by the fetcher and the walker.
//!
//! The core never prints; the CLI decides where notices go.

use std::fmt;
use std::path::Path;
use std::time::Duration;

/// One user-visible progress notice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent<'a> {
    /// About to issue a request after sleeping for this long.
    Delay(Duration),
    /// A listing page was fetched and parsed.
    Page {
        current_page: u64,
        total_pages: u64,
        total_count: u64,
    },
    /// An item payload was fetched and written.
    Item { index: &'a str, path: &'a Path },
}

impl fmt::Display for ProgressEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Delay(d) => write!(f, "{}", d.as_secs_f64()),
            ProgressEvent::Page {
                current_page,
                total_pages,
                total_count,
            } => write!(
                f,
                "Got metadata for page {} of {}: {} total items",
                current_page, total_pages, total_count
            ),
            ProgressEvent::Item { index, .. } => write!(f, "Got data for element {}", index),
        }
    }
}

/// Receives progress notices.
pub trait Progress {
    fn report(&mut self, event: ProgressEvent<'_>);
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _event: ProgressEvent<'_>) {}
}
