//! swirlfx runner.
//!
//! Usage: `swirlfx [config.json]`
//!
//! Without an argument the built-in defaults are used. Set `RUST_LOG` to
//! change verbosity, e.g. `RUST_LOG=swirlfx=debug`.

use std::process::ExitCode;

use swirlfx::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swirlfx=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => {
                tracing::info!(%path, "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(%path, %err, "could not load config, using defaults");
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    };

    match swirlfx::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "swirlfx exited with an error");
            ExitCode::FAILURE
        }
    }
}
