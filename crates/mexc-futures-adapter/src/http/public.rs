/*
[INPUT]:  Symbol identifiers, kline interval and row limit
[OUTPUT]: Market data (OHLCV tables, ticker prices, contract details)
[POS]:    HTTP layer - public market data endpoints (no signature required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::http::params::RequestParams;
use crate::http::{MexcClient, MexcError, Result};
use crate::types::{
    CandleValue, FetchOutcome, Interval, KlineRow, OhlcvTable, SymbolMetadata, TickerData,
};

pub const KLINE_ENDPOINT: &str = "/api/v1/contract/kline";
pub const TICKER_ENDPOINT: &str = "/api/v1/contract/ticker";
pub const DETAIL_ENDPOINT: &str = "/api/v1/contract/detail";

pub const DEFAULT_KLINE_LIMIT: u32 = 300;

impl MexcClient {
    /// Fetch candlesticks with prices and volume converted to `f64`
    ///
    /// GET /api/v1/contract/kline?symbol={symbol}&interval={interval}&limit={limit}
    ///
    /// Rows come back sorted ascending by time. An empty `data` array yields
    /// [`FetchOutcome::NoData`]; transport and envelope failures are errors.
    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<FetchOutcome<OhlcvTable<f64>>> {
        self.fetch_klines(symbol, interval, limit).await
    }

    /// Same as [`MexcClient::fetch_ohlcv`] but keeps the exchange's decimal precision
    pub async fn fetch_ohlcv_exact(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<FetchOutcome<OhlcvTable<Decimal>>> {
        self.fetch_klines(symbol, interval, limit).await
    }

    async fn fetch_klines<V: CandleValue>(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<FetchOutcome<OhlcvTable<V>>> {
        let result = self.load_klines(symbol, interval, limit).await;
        match &result {
            Ok(FetchOutcome::Data(table)) => {
                tracing::info!(symbol, rows = table.len(), "fetched klines");
            }
            Ok(FetchOutcome::NoData) => tracing::warn!(symbol, "no kline data returned"),
            Err(err) => tracing::error!(symbol, error = %err, "kline fetch failed"),
        }
        result
    }

    async fn load_klines<V: CandleValue>(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<FetchOutcome<OhlcvTable<V>>> {
        let params = RequestParams::new()
            .with("symbol", symbol)
            .with("interval", interval.as_str())
            .with("limit", limit);

        let rows: Vec<KlineRow> = self
            .get_data(KLINE_ENDPOINT, params)
            .await?
            .unwrap_or_default();

        if rows.is_empty() {
            return Ok(FetchOutcome::NoData);
        }

        let candles = rows
            .into_iter()
            .map(KlineRow::into_candle::<V>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| MexcError::InvalidResponse(format!("{symbol}: {err}")))?;

        Ok(FetchOutcome::Data(OhlcvTable::new(symbol, interval, candles)))
    }

    /// Fetch candlesticks for several symbols, one request at a time.
    ///
    /// A symbol that fails or has no data is skipped with a warning; the map
    /// holds only the symbols that produced rows.
    pub async fn fetch_multiple_ohlcv<S: AsRef<str>>(
        &self,
        symbols: &[S],
        interval: Interval,
        limit: u32,
    ) -> BTreeMap<String, OhlcvTable<f64>> {
        let mut results = BTreeMap::new();

        for symbol in symbols {
            let symbol = symbol.as_ref();
            tracing::info!(symbol, "fetching klines");

            match self.fetch_ohlcv(symbol, interval, limit).await {
                Ok(FetchOutcome::Data(table)) if !table.is_empty() => {
                    results.insert(symbol.to_string(), table);
                }
                Ok(_) => tracing::warn!(symbol, "skipping symbol: no data"),
                Err(err) => tracing::warn!(symbol, error = %err, "skipping symbol: fetch failed"),
            }
        }

        tracing::info!(
            requested = symbols.len(),
            fetched = results.len(),
            "multi-symbol kline fetch complete"
        );
        results
    }

    /// Fetch the ticker for one contract
    ///
    /// GET /api/v1/contract/ticker?symbol={symbol}
    pub async fn fetch_ticker(&self, symbol: &str) -> Result<TickerData> {
        let params = RequestParams::new().with("symbol", symbol);
        let result = self.get_data::<TickerData>(TICKER_ENDPOINT, params).await;

        match result {
            Ok(ticker) => Ok(ticker.unwrap_or_default()),
            Err(err) => {
                tracing::error!(symbol, error = %err, "ticker fetch failed");
                Err(err)
            }
        }
    }

    /// Latest traded price; a ticker without `lastPrice` reads as `0.0`
    pub async fn fetch_ticker_price(&self, symbol: &str) -> Result<f64> {
        let ticker = self.fetch_ticker(symbol).await?;
        let price = ticker.last_price.to_f64().ok_or_else(|| {
            MexcError::InvalidResponse(format!("{symbol}: lastPrice {} out of range", ticker.last_price))
        })?;

        tracing::info!(symbol, price, "fetched ticker price");
        Ok(price)
    }

    /// Fetch contract details for one symbol, or for every symbol when `None`
    ///
    /// GET /api/v1/contract/detail[?symbol={symbol}]
    pub async fn fetch_symbol_info(&self, symbol: Option<&str>) -> Result<SymbolMetadata> {
        let mut params = RequestParams::new();
        params.insert_opt("symbol", symbol);

        match self.get_data::<SymbolMetadata>(DETAIL_ENDPOINT, params).await {
            Ok(meta) => Ok(meta.unwrap_or_default()),
            Err(err) => {
                tracing::error!(symbol = symbol.unwrap_or("*"), error = %err, "symbol info fetch failed");
                Err(err)
            }
        }
    }

    /// [`MexcClient::fetch_symbol_info`] with failures collapsed to an empty mapping
    pub async fn fetch_symbol_info_or_empty(&self, symbol: Option<&str>) -> SymbolMetadata {
        self.fetch_symbol_info(symbol).await.unwrap_or_default()
    }
}
