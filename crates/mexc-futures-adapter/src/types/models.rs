/*
[INPUT]:  Raw kline rows from the contract kline endpoint
[OUTPUT]: Time-sorted OHLCV tables and explicit fetch outcomes
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::Interval;

/// Outcome of a read that may legitimately return nothing
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Data(T),
    /// The exchange answered successfully with an empty payload
    NoData,
}

impl<T> FetchOutcome<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchOutcome::NoData)
    }

    pub fn data(self) -> Option<T> {
        match self {
            FetchOutcome::Data(value) => Some(value),
            FetchOutcome::NoData => None,
        }
    }

    pub fn as_ref(&self) -> FetchOutcome<&T> {
        match self {
            FetchOutcome::Data(value) => FetchOutcome::Data(value),
            FetchOutcome::NoData => FetchOutcome::NoData,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Data(value) => FetchOutcome::Data(f(value)),
            FetchOutcome::NoData => FetchOutcome::NoData,
        }
    }
}

/// One raw kline row: `[time, open, high, low, close, volume]`
///
/// `time` is epoch seconds. Numeric columns accept JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct KlineRow {
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl TryFrom<Vec<Value>> for KlineRow {
    type Error = String;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        let [time, open, high, low, close, volume]: [Value; 6] = values
            .try_into()
            .map_err(|values: Vec<Value>| {
                format!("kline row must have 6 columns, got {}", values.len())
            })?;

        Ok(Self {
            time: serde_helpers::epoch_seconds_from_value(&time)?,
            open: serde_helpers::decimal_from_value(&open, "open")?,
            high: serde_helpers::decimal_from_value(&high, "high")?,
            low: serde_helpers::decimal_from_value(&low, "low")?,
            close: serde_helpers::decimal_from_value(&close, "close")?,
            volume: serde_helpers::decimal_from_value(&volume, "volume")?,
        })
    }
}

impl KlineRow {
    /// Convert into a candle, interpreting `time` as epoch seconds
    pub fn into_candle<V: CandleValue>(self) -> Result<Candle<V>, String> {
        let time = DateTime::from_timestamp(self.time, 0)
            .ok_or_else(|| format!("kline time out of range: {}", self.time))?;

        let convert = |value: Decimal, column: &str| {
            V::from_decimal(value)
                .ok_or_else(|| format!("kline {column} not representable: {value}"))
        };

        Ok(Candle {
            time,
            open: convert(self.open, "open")?,
            high: convert(self.high, "high")?,
            low: convert(self.low, "low")?,
            close: convert(self.close, "close")?,
            volume: convert(self.volume, "volume")?,
        })
    }
}

/// Numeric representation a candle can be materialized in
pub trait CandleValue: Copy + PartialEq {
    fn from_decimal(value: Decimal) -> Option<Self>;
}

impl CandleValue for f64 {
    fn from_decimal(value: Decimal) -> Option<Self> {
        value.to_f64()
    }
}

impl CandleValue for Decimal {
    fn from_decimal(value: Decimal) -> Option<Self> {
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle<V = f64> {
    pub time: DateTime<Utc>,
    pub open: V,
    pub high: V,
    pub low: V,
    pub close: V,
    pub volume: V,
}

/// OHLCV rows for one symbol, sorted ascending by time
///
/// Rows are never de-duplicated; equal timestamps keep their upstream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcvTable<V = f64> {
    symbol: String,
    interval: Interval,
    rows: Vec<Candle<V>>,
}

impl<V: CandleValue> OhlcvTable<V> {
    pub fn new(symbol: impl Into<String>, interval: Interval, mut rows: Vec<Candle<V>>) -> Self {
        rows.sort_by_key(|candle| candle.time);
        Self {
            symbol: symbol.into(),
            interval,
            rows,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&Candle<V>> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Candle<V>> {
        self.rows.last()
    }

    /// Look up the first row stamped exactly at `time`
    pub fn get(&self, time: DateTime<Utc>) -> Option<&Candle<V>> {
        let idx = self.rows.partition_point(|candle| candle.time < time);
        self.rows.get(idx).filter(|candle| candle.time == time)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candle<V>> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Candle<V>] {
        &self.rows
    }

    pub fn closes(&self) -> Vec<V> {
        self.rows.iter().map(|candle| candle.close).collect()
    }

    pub fn into_rows(self) -> Vec<Candle<V>> {
        self.rows
    }
}

pub(crate) mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn decimal_from_value(value: &Value, field: &str) -> Result<Decimal, String> {
        match value {
            Value::String(raw) => Decimal::from_str(raw.trim())
                .or_else(|_| Decimal::from_scientific(raw.trim()))
                .map_err(|err| format!("invalid {field} value {raw:?}: {err}")),
            Value::Number(number) => {
                let raw = number.to_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map_err(|err| format!("invalid {field} value {raw}: {err}"))
            }
            other => Err(format!("invalid {field} value: {other}")),
        }
    }

    pub fn epoch_seconds_from_value(value: &Value) -> Result<i64, String> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|secs| secs.fract() == 0.0)
                        .map(|secs| secs as i64)
                })
                .ok_or_else(|| format!("invalid kline time: {number}")),
            Value::String(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|err| format!("invalid kline time {raw:?}: {err}")),
            other => Err(format!("invalid kline time: {other}")),
        }
    }

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(Decimal::ZERO),
            Value::String(raw) if raw.trim().is_empty() => Ok(Decimal::ZERO),
            _ => decimal_from_value(&value, "decimal").map_err(serde::de::Error::custom),
        }
    }

    pub fn deserialize_optional_decimal<'de, D>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            _ => decimal_from_value(&value, "decimal")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("decimal literal")
    }

    fn candle(time: i64, close: f64) -> Candle<f64> {
        Candle {
            time: DateTime::from_timestamp(time, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn kline_row_accepts_strings_and_numbers() {
        let row: KlineRow =
            serde_json::from_value(json!([1_700_000_000, "101.5", 102, "99.25", 100.75, "12"]))
                .expect("row should deserialize");

        assert_eq!(row.time, 1_700_000_000);
        assert_eq!(row.open, dec("101.5"));
        assert_eq!(row.high, dec("102"));
        assert_eq!(row.low, dec("99.25"));
        assert_eq!(row.close, dec("100.75"));
        assert_eq!(row.volume, dec("12"));
    }

    #[test]
    fn kline_row_accepts_string_timestamp() {
        let row: KlineRow = serde_json::from_value(json!(["1700000900", 1, 1, 1, 1, 0]))
            .expect("row should deserialize");
        assert_eq!(row.time, 1_700_000_900);
    }

    #[test]
    fn kline_row_rejects_wrong_width() {
        let err = serde_json::from_value::<KlineRow>(json!([1_700_000_000, 1, 2, 3, 4]))
            .expect_err("five columns must be rejected");
        assert!(err.to_string().contains("6 columns"));
    }

    #[test]
    fn kline_row_rejects_non_numeric_price() {
        let err = serde_json::from_value::<KlineRow>(json!([1_700_000_000, "abc", 1, 1, 1, 1]))
            .expect_err("non numeric open must be rejected");
        assert!(err.to_string().contains("open"));
    }

    #[test]
    fn kline_row_converts_time_as_seconds() {
        let row: KlineRow =
            serde_json::from_value(json!([1_700_000_000, "1", "2", "0.5", "1.5", "10"])).unwrap();
        let candle: Candle<f64> = row.into_candle().unwrap();

        assert_eq!(candle.time.to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(candle.close, 1.5);
    }

    #[test]
    fn kline_row_keeps_exact_decimals() {
        let row: KlineRow = serde_json::from_value(json!([
            1_700_000_000,
            "0.0000123",
            "0.0000125",
            "0.0000120",
            "0.0000124",
            "1000000"
        ]))
        .unwrap();
        let candle: Candle<Decimal> = row.into_candle().unwrap();
        assert_eq!(candle.close, dec("0.0000124"));
    }

    #[test]
    fn table_sorts_rows_ascending() {
        let table = OhlcvTable::new(
            "SOL_USDT",
            Interval::Min15,
            vec![candle(300, 3.0), candle(100, 1.0), candle(200, 2.0)],
        );

        let times: Vec<i64> = table.iter().map(|c| c.time.timestamp()).collect();
        assert_eq!(times, vec![100, 200, 300]);
        assert_eq!(table.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(table.last().map(|c| c.close), Some(3.0));
    }

    #[test]
    fn table_keeps_duplicate_timestamps_in_upstream_order() {
        let table = OhlcvTable::new(
            "SOL_USDT",
            Interval::Min15,
            vec![candle(200, 2.0), candle(100, 1.0), candle(200, 2.5)],
        );

        assert_eq!(table.len(), 3);
        assert_eq!(table.closes(), vec![1.0, 2.0, 2.5]);
    }

    #[test]
    fn table_lookup_by_time() {
        let table = OhlcvTable::new(
            "SOL_USDT",
            Interval::Min15,
            vec![candle(100, 1.0), candle(200, 2.0)],
        );

        let hit = table.get(DateTime::from_timestamp(200, 0).unwrap());
        assert_eq!(hit.map(|c| c.close), Some(2.0));
        assert!(table.get(DateTime::from_timestamp(150, 0).unwrap()).is_none());
    }

    #[test]
    fn fetch_outcome_helpers() {
        let outcome = FetchOutcome::Data(3);
        assert!(!outcome.is_no_data());
        assert_eq!(outcome.clone().map(|v| v * 2).data(), Some(6));

        let empty: FetchOutcome<i32> = FetchOutcome::NoData;
        assert!(empty.is_no_data());
        assert_eq!(empty.data(), None);
    }
}
