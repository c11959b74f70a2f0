/*
[INPUT]:  MEXC contract API token and numeric code tables
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kline granularity tokens accepted by `/api/v1/contract/kline`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Min1,
    Min5,
    #[default]
    Min15,
    Min30,
    Min60,
    Hour4,
    Hour8,
    Day1,
    Week1,
    Month1,
}

impl Interval {
    pub const ALL: [Interval; 10] = [
        Interval::Min1,
        Interval::Min5,
        Interval::Min15,
        Interval::Min30,
        Interval::Min60,
        Interval::Hour4,
        Interval::Hour8,
        Interval::Day1,
        Interval::Week1,
        Interval::Month1,
    ];

    /// Exchange token sent in the `interval` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Min1 => "Min1",
            Interval::Min5 => "Min5",
            Interval::Min15 => "Min15",
            Interval::Min30 => "Min30",
            Interval::Min60 => "Min60",
            Interval::Hour4 => "Hour4",
            Interval::Hour8 => "Hour8",
            Interval::Day1 => "Day1",
            Interval::Week1 => "Week1",
            Interval::Month1 => "Month1",
        }
    }

    /// Candle width in seconds (a month is counted as 30 days)
    pub fn seconds(self) -> i64 {
        match self {
            Interval::Min1 => 60,
            Interval::Min5 => 5 * 60,
            Interval::Min15 => 15 * 60,
            Interval::Min30 => 30 * 60,
            Interval::Min60 => 60 * 60,
            Interval::Hour4 => 4 * 60 * 60,
            Interval::Hour8 => 8 * 60 * 60,
            Interval::Day1 => 24 * 60 * 60,
            Interval::Week1 => 7 * 24 * 60 * 60,
            Interval::Month1 => 30 * 24 * 60 * 60,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| format!("unknown interval token: {s}"))
    }
}

/// Generates the numeric code conversions shared by the contract code tables.
macro_rules! code_table {
    ($name:ident { $($variant:ident = $code:literal),+ $(,)? }) => {
        impl $name {
            /// Numeric code used on the wire
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(format!("unknown {} code: {}", stringify!($name), other)),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    PostOnly,
    Ioc,
    Fok,
}

code_table!(OrderType {
    Market = 1,
    Limit = 2,
    PostOnly = 3,
    Ioc = 4,
    Fok = 5,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

code_table!(OrderSide { Buy = 1, Sell = 2 });

/// Margin mode used when opening a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpenType {
    Isolated,
    Cross,
}

code_table!(OpenType { Isolated = 1, Cross = 2 });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    OneWay,
    Hedge,
}

code_table!(PositionMode { OneWay = 1, Hedge = 2 });
