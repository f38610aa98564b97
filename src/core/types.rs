use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub(crate) fn ensure_valid(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// One trading period summarized as open/high/low/close plus traded volume.
///
/// `low <= open, close <= high` is expected from providers but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar date as fractional unix seconds, the unit used by the time scale.
    #[must_use]
    pub fn time(&self) -> f64 {
        datetime_to_unix_seconds(self.date)
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Immutable, date-ordered bar sequence shared by every chart computation.
///
/// Cloning is cheap: all clones point at the same bars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    bars: Arc<[PriceBar]>,
}

impl Dataset {
    /// Builds a dataset, checking that values are finite and dates strictly increase.
    pub fn new(bars: Vec<PriceBar>) -> ChartResult<Self> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.open.is_finite()
                || !bar.high.is_finite()
                || !bar.low.is_finite()
                || !bar.close.is_finite()
                || !bar.volume.is_finite()
            {
                return Err(ChartError::InvalidData(format!(
                    "bar {index} has non-finite values"
                )));
            }
            if bar.volume < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "bar {index} has negative volume"
                )));
            }
        }

        if let Some(pos) = bars.windows(2).position(|pair| pair[0].date >= pair[1].date) {
            return Err(ChartError::InvalidData(format!(
                "bar dates must be strictly increasing (bar {} is not after bar {pos})",
                pos + 1
            )));
        }

        Ok(Self { bars: bars.into() })
    }

    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }
}

impl Deref for Dataset {
    type Target = [PriceBar];

    fn deref(&self) -> &Self::Target {
        &self.bars
    }
}

impl TryFrom<Vec<PriceBar>> for Dataset {
    type Error = ChartError;

    fn try_from(bars: Vec<PriceBar>) -> ChartResult<Self> {
        Self::new(bars)
    }
}
