//! CLI for ooni-dl.

mod commands;

use anyhow::Result;
use clap::Parser;
use ooni_dl_core::config::{self, OoniConfig};
use ooni_dl_core::output::DEFAULT_OUTPUT_DIR;
use ooni_dl_core::query::ParamPair;
use std::path::PathBuf;

use commands::run_download;

/// Grab a batch of results from OONI's RESTful interface.
#[derive(Debug, Parser)]
#[command(name = "ooni-dl")]
#[command(about = "Grab a batch of results from OONI's RESTful interface", long_about = None)]
pub struct Cli {
    /// Arguments to append to the HTTP GET request for resources. Used to filter the search.
    #[arg(long, default_value = "", value_name = "ARGS")]
    pub get_arguments: String,

    /// Where to write results.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    pub output_directory: PathBuf,

    /// Config file to use instead of ~/.config/ooni-dl/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Listing endpoint (overrides `api_url` from the config file).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Attempts per request before giving up (overrides `backoff.max_attempts`).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Extra HTTP GET parameters as key:value pairs.
    #[arg(value_name = "KEY:VALUE")]
    pub params: Vec<ParamPair>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        run_download(&cfg, &cli.get_arguments, &cli.params, &cli.output_directory)
    }

    /// Config file (explicit or XDG default) with command-line overrides applied.
    fn load_config(&self) -> Result<OoniConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        if let Some(url) = &self.api_url {
            cfg.api_url = url.clone();
        }
        if let Some(n) = self.max_attempts {
            cfg.backoff.max_attempts = n;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests;
