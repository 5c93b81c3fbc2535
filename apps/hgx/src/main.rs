//! # hgx
//!
//! Command-line front end for the hgx-core hypergraph store.
//!
//! ## Usage
//!
//! ```bash
//! # Summary of an edge list
//! hgx -i edges.txt stats
//!
//! # Edges of size 3 or less, as JSON
//! hgx -i edges.txt --json-mode edges --size 3 --up-to
//!
//! # Restrict to a node subset
//! hgx -i edges.txt subgraph --nodes 1,2,4
//!
//! # Convert to a JSON snapshot
//! hgx -i edges.txt export -o edges.json
//! ```

use clap::Parser;
use hgx::cli;
use hgx::config::{AppConfig, LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    let config = match AppConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LogConfig::default(), cli.verbose);
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log, cli.verbose);

    if let Err(e) = cli::execute(cli, config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global subscriber. HGX_LOG_FORMAT=json enables
/// machine-parseable output; RUST_LOG overrides the configured filter.
fn init_tracing(log: &LogConfig, verbose: bool) {
    let env_format = std::env::var("HGX_LOG_FORMAT").ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "hgx=debug,hgx_core=debug".into()
        } else {
            log.filter_directive().into()
        }
    });

    match log.effective_format(env_format.as_deref()) {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
