/*
[INPUT]:  JSON bodies returned by the MEXC contract API
[OUTPUT]: Typed envelope, ticker and symbol metadata structs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::models::serde_helpers;

/// Envelope `code` that marks a successful call
pub const SUCCESS_CODE: i64 = 200;

/// Outer wrapper shared by every contract API response: `{code, msg, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Failure text reported by the exchange
    pub fn message(&self) -> &str {
        self.msg.as_deref().unwrap_or("unknown error")
    }
}

/// `data` payload of `/api/v1/contract/ticker`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerData {
    #[serde(default)]
    pub symbol: Option<String>,
    /// Missing or null prices read as zero
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero"
    )]
    pub last_price: Decimal,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_optional_decimal")]
    pub bid1: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_optional_decimal")]
    pub ask1: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_optional_decimal")]
    pub index_price: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_optional_decimal")]
    pub fair_price: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_optional_decimal")]
    pub funding_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_optional_decimal")]
    pub volume24: Option<Decimal>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Contract detail payload, passed through exactly as the exchange sent it
///
/// A single symbol yields an object; the all-symbols form is whatever shape the
/// exchange returns (usually an array of objects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolMetadata(pub Value);

impl Default for SymbolMetadata {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl SymbolMetadata {
    /// Top-level field of an object payload
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Entry describing `symbol`, whether the payload is one object or a list
    pub fn find_symbol(&self, symbol: &str) -> Option<&Value> {
        let matches = |entry: &&Value| {
            entry.get("symbol").and_then(Value::as_str) == Some(symbol)
        };

        match &self.0 {
            Value::Array(items) => items.iter().find(matches),
            object @ Value::Object(_) => Some(object).filter(matches),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}
