//! Walk the listing and save every measurement payload.

use anyhow::{Context, Result};
use ooni_dl_core::backoff::BackoffPolicy;
use ooni_dl_core::config::OoniConfig;
use ooni_dl_core::http::CurlTransport;
use ooni_dl_core::progress::{Progress, ProgressEvent};
use ooni_dl_core::query::{build_start_url, ParamPair};
use ooni_dl_core::{walk, Fetcher};
use std::io::{self, Write};
use std::path::Path;

pub fn run_download(
    cfg: &OoniConfig,
    get_arguments: &str,
    params: &[ParamPair],
    output_directory: &Path,
) -> Result<()> {
    let start_url = build_start_url(&cfg.api_url, get_arguments, params)?;
    let transport = CurlTransport::new(&cfg.user_agent).context("failed to set up HTTP client")?;
    let mut fetcher = Fetcher::new(transport, BackoffPolicy::from(&cfg.backoff));

    tracing::info!(
        start_url = %start_url,
        output = %output_directory.display(),
        max_attempts = cfg.backoff.max_attempts,
        "starting walk"
    );
    let summary = walk(&mut fetcher, &start_url, output_directory, &mut ConsoleProgress)?;
    tracing::info!(
        "run completed: {} page(s), {} item(s)",
        summary.pages,
        summary.items
    );
    Ok(())
}

/// Prints each notice on its own stdout line and flushes immediately.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn report(&mut self, event: ProgressEvent<'_>) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{event}");
        let _ = out.flush();
    }
}
