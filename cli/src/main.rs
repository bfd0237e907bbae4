use std::path::Path;

use clap::error::ErrorKind;
use cypress_rerun_core::api::{load_default, load_dotenv, DEFAULT_DOTENV_FILE};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
use commands::cli;

fn main() {
    // Before the runtime starts its workers and before the subscriber, so a
    // RUST_LOG from .env is honored.
    let dotenv = load_dotenv(Path::new(DEFAULT_DOTENV_FILE));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::debug!(argv = ?std::env::args().collect::<Vec<_>>(), "process argv");

    if let Err(e) = dotenv {
        tracing::warn!("ignoring {}: {:#}", DEFAULT_DOTENV_FILE, anyhow::Error::new(e));
    }

    let args = match cli::Args::parse_wrapper(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => fail(anyhow::Error::new(e).context("invalid wrapper arguments")),
    };

    let cfg = match load_default() {
        Ok(cfg) => cfg,
        Err(e) => fail(anyhow::Error::new(e)),
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => fail(anyhow::Error::new(e).context("starting the async runtime")),
    };

    match runtime.block_on(app::run_app(args, cfg)) {
        Ok(code) => std::process::exit(code),
        Err(e) => fail(anyhow::Error::new(e)),
    }
}

fn fail(e: anyhow::Error) -> ! {
    tracing::error!("error: {:#}", e);
    std::process::exit(1);
}
