use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Candle granularity accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    Day,
    Week,
    Month,
}

impl Resolution {
    pub const ALL: [Self; 8] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::SixtyMinutes,
        Self::Day,
        Self::Week,
        Self::Month,
    ];

    /// Query-string value understood by the provider.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::OneMinute => "1",
            Self::FiveMinutes => "5",
            Self::FifteenMinutes => "15",
            Self::ThirtyMinutes => "30",
            Self::SixtyMinutes => "60",
            Self::Day => "D",
            Self::Week => "W",
            Self::Month => "M",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Resolution {
    type Err = ChartError;

    fn from_str(value: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|resolution| resolution.as_wire() == value)
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "unsupported resolution `{value}` (expected one of 1, 5, 15, 30, 60, D, W, M)"
                ))
            })
    }
}

/// One candle query: a symbol, a granularity and an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleRequest {
    pub symbol: String,
    pub resolution: Resolution,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl CandleRequest {
    pub fn new(
        symbol: impl Into<String>,
        resolution: Resolution,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ChartResult<Self> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "symbol must not be empty".to_owned(),
            ));
        }
        if from > to {
            return Err(ChartError::InvalidData(
                "request range start must not be after its end".to_owned(),
            ));
        }
        Ok(Self {
            symbol,
            resolution,
            from,
            to,
        })
    }

    /// Range covering the `months` calendar months that end at `now`.
    pub fn trailing_months(
        symbol: impl Into<String>,
        resolution: Resolution,
        now: DateTime<Utc>,
        months: u32,
    ) -> ChartResult<Self> {
        let from = now.checked_sub_months(Months::new(months)).ok_or_else(|| {
            ChartError::InvalidData(format!("cannot go back {months} months from {now}"))
        })?;
        Self::new(symbol, resolution, from, now)
    }

    /// Range bounds as whole unix seconds, rounded down.
    #[must_use]
    pub fn unix_range(&self) -> (i64, i64) {
        (
            self.from.timestamp_millis().div_euclid(1000),
            self.to.timestamp_millis().div_euclid(1000),
        )
    }
}
