//! QuickFX terminal converter
//!
//! Line-oriented front-end for the conversion coordinator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickfx_common::{Currency, CurrencyCatalog};
use quickfx_converter::{ConverterState, Coordinator};
use quickfx_fx::HttpRateProvider;

mod command;
mod config;
mod session;

use config::TerminalConfig;
use session::Session;

/// QuickFX CLI
#[derive(Parser, Debug)]
#[command(name = "quickfx")]
#[command(about = "Convert between currencies using live mid-market rates")]
struct Args {
    /// Rates endpoint (queried as <endpoint>?base=<CODE>)
    #[arg(long)]
    endpoint: Option<String>,

    /// JSON file with [{"code": .., "name": ..}] entries
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Initial amount
    #[arg(short, long)]
    amount: Option<String>,

    /// Initial currency to convert from
    #[arg(short, long)]
    from: Option<String>,

    /// Initial currency to convert to
    #[arg(short, long)]
    to: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Layer command-line flags over environment-derived config.
    fn apply(self, mut config: TerminalConfig) -> TerminalConfig {
        if let Some(endpoint) = self.endpoint {
            config.fx.endpoint = endpoint;
        }
        if let Some(path) = self.catalog {
            config.catalog_path = Some(path);
        }
        if let Some(amount) = self.amount {
            config.amount = amount;
        }
        if let Some(from) = self.from {
            config.from = Currency::new(from);
        }
        if let Some(to) = self.to {
            config.to = Currency::new(to);
        }
        if let Some(secs) = self.timeout_secs {
            config.fx.request_timeout = Some(Duration::from_secs(secs));
        }
        config.log_json |= self.log_json;
        config
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );

    // stdout is the converter display; logs go to stderr.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.apply(TerminalConfig::from_env());

    init_logging(config.log_json);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let catalog = match &config.catalog_path {
        Some(path) => CurrencyCatalog::load(path)?,
        None => CurrencyCatalog::builtin(),
    };

    if let Err(e) = config.check_codes(&catalog) {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    info!(
        endpoint = %config.fx.endpoint,
        currencies = catalog.len(),
        "Starting QuickFX"
    );

    let provider = Arc::new(HttpRateProvider::new(config.fx.clone())?);
    let initial = ConverterState::new(
        config.initial_amount().map_err(anyhow::Error::msg)?,
        config.initial_pair(),
    );
    let coordinator = Arc::new(Coordinator::with_state(provider, initial));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = Session::new(coordinator, catalog, std::io::stdout());
    session.run(stdin).await?;

    Ok(())
}
