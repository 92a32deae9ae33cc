pub mod config;
pub mod logging;

pub mod backoff;
pub mod fetch;
pub mod http;
pub mod output;
pub mod page;
pub mod progress;
pub mod query;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use fetch::{FetchExhausted, Fetcher};
pub use walker::{walk, WalkError, WalkSummary};
