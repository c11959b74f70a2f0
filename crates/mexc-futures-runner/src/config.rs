/*
[INPUT]:  Optional YAML configuration file
[OUTPUT]: Validated static trading parameters
[POS]:    Configuration layer - symbols, rounding tables and risk constants
[UPDATE]: When adding new configuration options
*/

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use mexc_futures_adapter::{Interval, PositionMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::precision::round_to_precision;

/// Static trading parameters consumed by strategies built on the adapter.
///
/// Every field has a default, so a YAML file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TradingConfig {
    /// Contract API host
    pub api_base_url: String,
    /// Contracts traded, in exchange format (e.g., "SOL_USDT")
    pub symbols: Vec<String>,
    pub interval: Interval,
    /// Accepted ATR band per symbol
    pub atr_ranges: BTreeMap<String, AtrRange>,
    /// Decimal places for order quantity; negative rounds to tens, hundreds, ...
    pub quantity_precision: BTreeMap<String, i32>,
    /// Decimal places for take-profit prices
    pub take_profit_precision: BTreeMap<String, i32>,
    /// Fixed USDT amount risked per trade
    pub risk_per_trade_usdt: Decimal,
    pub leverage: u32,
    pub position_mode: PositionMode,
    pub rate_limits: RateLimits,
    /// Contract websocket endpoint (not used by the REST client)
    pub websocket_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AtrRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl AtrRange {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Documented exchange request ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimits {
    pub requests_per_second: u32,
    pub requests_per_minute: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            requests_per_second: 20,
            requests_per_minute: 1200,
        }
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        let atr_ranges = [
            ("SOL_USDT", AtrRange::new(Decimal::new(44, 2), Decimal::new(84, 2))),
            ("1000PEPE_USDT", AtrRange::new(Decimal::new(74, 2), Decimal::new(13, 1))),
            ("SUI_USDT", AtrRange::new(Decimal::new(61, 2), Decimal::new(113, 2))),
        ];

        let quantity_precision = [
            ("BTC_USDT", 3),
            ("ETH_USDT", 2),
            ("BNB_USDT", 2),
            ("SOL_USDT", 1),
            ("1000PEPE_USDT", -2),
            ("ARB_USDT", 1),
            ("SUI_USDT", -1),
            ("DOGE_USDT", 0),
            ("XRP_USDT", 0),
            ("OP_USDT", 1),
        ];

        let take_profit_precision = [
            ("BTC_USDT", 2),
            ("ETH_USDT", 2),
            ("BNB_USDT", 2),
            ("SOL_USDT", 3),
            ("1000PEPE_USDT", 7),
            ("ARB_USDT", 4),
            ("SUI_USDT", 5),
            ("DOGE_USDT", 5),
            ("XRP_USDT", 4),
            ("OP_USDT", 4),
        ];

        Self {
            api_base_url: mexc_futures_adapter::http::BASE_URL.to_string(),
            symbols: ["SUI_USDT", "1000PEPE_USDT", "SOL_USDT"]
                .map(String::from)
                .to_vec(),
            interval: Interval::Min15,
            atr_ranges: owned_table(atr_ranges),
            quantity_precision: owned_table(quantity_precision),
            take_profit_precision: owned_table(take_profit_precision),
            risk_per_trade_usdt: Decimal::new(5, 0),
            leverage: 10,
            position_mode: PositionMode::Hedge,
            rate_limits: RateLimits::default(),
            websocket_url: "wss://contract.mexc.com/ws".to_string(),
        }
    }
}

fn owned_table<V, const N: usize>(entries: [(&str, V); N]) -> BTreeMap<String, V> {
    entries
        .into_iter()
        .map(|(symbol, value)| (symbol.to_string(), value))
        .collect()
}

impl TradingConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse config yaml")?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.symbols.is_empty() {
            bail!("symbols must not be empty");
        }
        if let Some(symbol) = self.symbols.iter().find(|s| s.trim().is_empty()) {
            bail!("invalid blank symbol {symbol:?}");
        }
        for (symbol, range) in &self.atr_ranges {
            if range.low <= Decimal::ZERO || range.low > range.high {
                bail!(
                    "ATR range for {symbol} must satisfy 0 < low <= high, got {}..{}",
                    range.low,
                    range.high
                );
            }
        }
        if self.leverage == 0 {
            bail!("leverage must be at least 1");
        }
        if self.risk_per_trade_usdt <= Decimal::ZERO {
            bail!("risk_per_trade_usdt must be positive");
        }
        if self.rate_limits.requests_per_second == 0 || self.rate_limits.requests_per_minute == 0 {
            bail!("rate limits must be positive");
        }
        Ok(())
    }

    pub fn atr_range(&self, symbol: &str) -> Option<AtrRange> {
        self.atr_ranges.get(symbol).copied()
    }

    /// Round an order quantity with the symbol's precision; `None` if the symbol has no entry
    pub fn round_quantity(&self, symbol: &str, quantity: Decimal) -> Option<Decimal> {
        self.quantity_precision
            .get(symbol)
            .map(|&precision| round_to_precision(quantity, precision))
    }

    /// Round a take-profit price with the symbol's precision
    pub fn round_take_profit(&self, symbol: &str, price: Decimal) -> Option<Decimal> {
        self.take_profit_precision
            .get(symbol)
            .map(|&precision| round_to_precision(price, precision))
    }
}
