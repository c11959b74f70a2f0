/*
[INPUT]:  Configured client, trading configuration, probe symbol and row limit
[OUTPUT]: Smoke report covering kline, multi-symbol and ticker reads
[POS]:    Runner layer - end-to-end check of the public market data calls
[UPDATE]: When the smoke sequence gains or loses calls
*/

use mexc_futures_adapter::{FetchOutcome, MexcClient};
use tracing::{info, warn};

use crate::config::TradingConfig;

/// What each smoke step produced
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmokeReport {
    /// Rows fetched for the probe symbol; `None` when it had no data or failed
    pub probe_rows: Option<usize>,
    /// Configured symbols that returned klines
    pub fetched_symbols: Vec<String>,
    /// Probe symbol's last price; `None` when unavailable
    pub ticker_price: Option<f64>,
}

impl SmokeReport {
    pub fn all_succeeded(&self, config: &TradingConfig) -> bool {
        self.probe_rows.is_some()
            && self.ticker_price.is_some()
            && self.fetched_symbols.len() == config.symbols.len()
    }
}

/// Single-symbol klines, klines for every configured symbol, then the probe ticker.
pub async fn run_smoke(
    client: &MexcClient,
    config: &TradingConfig,
    probe_symbol: &str,
    limit: u32,
) -> SmokeReport {
    let probe_rows = match client.fetch_ohlcv(probe_symbol, config.interval, limit).await {
        Ok(FetchOutcome::Data(table)) => {
            if let Some(last) = table.last() {
                info!(
                    symbol = probe_symbol,
                    rows = table.len(),
                    last_time = %last.time,
                    last_close = last.close,
                    "probe klines"
                );
            }
            Some(table.len())
        }
        Ok(FetchOutcome::NoData) => {
            warn!(symbol = probe_symbol, "probe returned no klines");
            None
        }
        Err(err) => {
            warn!(symbol = probe_symbol, error = %err, "probe kline fetch failed");
            None
        }
    };

    let tables = client
        .fetch_multiple_ohlcv(config.symbols.as_slice(), config.interval, limit)
        .await;
    let fetched_symbols: Vec<String> = tables.keys().cloned().collect();

    let ticker_price = match client.fetch_ticker_price(probe_symbol).await {
        Ok(price) => Some(price),
        Err(err) => {
            warn!(symbol = probe_symbol, error = %err, "ticker price unavailable");
            None
        }
    };

    SmokeReport {
        probe_rows,
        fetched_symbols,
        ticker_price,
    }
}
