/*
[INPUT]:  CLI arguments, optional YAML configuration, MEXC_API_KEY / MEXC_API_SECRET
[OUTPUT]: Smoke run of the public market data calls, summarized in the log
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use mexc_futures_adapter::{ClientConfig, Credentials, DEFAULT_KLINE_LIMIT, MexcClient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mexc_futures_runner::{TradingConfig, run_smoke};

#[derive(Parser, Debug)]
#[command(name = "mexc-futures-runner", version, about = "MEXC futures market data smoke run")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "symbol", value_name = "SYMBOL", default_value = "SOL_USDT")]
    symbol: String,
    #[arg(long = "limit", value_name = "ROWS", default_value_t = DEFAULT_KLINE_LIMIT)]
    limit: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    config.validate().context("validate config")?;
    info!(
        symbols = config.symbols.len(),
        interval = %config.interval,
        "configuration loaded"
    );

    let client = build_client(&config)?;
    let report = run_smoke(&client, &config, &args.symbol, args.limit).await;

    info!(
        probe_rows = ?report.probe_rows,
        fetched = ?report.fetched_symbols,
        ticker_price = ?report.ticker_price,
        complete = report.all_succeeded(&config),
        "smoke run finished"
    );
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<TradingConfig> {
    match path {
        Some(path) => {
            info!(config_path = %path.display(), "loading configuration");
            TradingConfig::from_file(path).context("load config")
        }
        None => Ok(TradingConfig::default()),
    }
}

/// Every smoke call is unsigned, so missing credentials only downgrade to public mode.
fn build_client(config: &TradingConfig) -> Result<MexcClient> {
    let credentials = match Credentials::from_env() {
        Ok(credentials) => Some(credentials),
        Err(err) => {
            warn!(error = %err, "credentials unavailable; continuing without signing");
            None
        }
    };

    MexcClient::with_config_and_base_url(ClientConfig::default(), &config.api_base_url, credentials)
        .context("build MEXC client")
}
