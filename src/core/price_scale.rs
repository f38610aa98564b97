use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PriceBar, Viewport};
use crate::error::{ChartError, ChartResult};

/// Fixed downward padding, in price units, below the lowest close.
pub const PRICE_DOMAIN_PADDING: f64 = 5.0;

/// Price axis mapped to an inverted Y pixel axis (higher price, smaller y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    linear: LinearScale,
}

impl PriceScale {
    /// Creates a scale over `[price_min, price_max]` and `[height, 0]` pixels.
    pub fn new(price_min: f64, price_max: f64, viewport: Viewport) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if price_min > price_max {
            return Err(ChartError::InvalidData(
                "price scale min must not exceed its max".to_owned(),
            ));
        }
        let linear = LinearScale::new((price_min, price_max), (f64::from(viewport.height), 0.0))?;
        Ok(Self { linear })
    }

    /// Fits `[min(close) - PRICE_DOMAIN_PADDING, max(close)]`.
    pub fn from_closes(bars: &[PriceBar], viewport: Viewport) -> ChartResult<Self> {
        if bars.is_empty() {
            return Err(ChartError::DataRange(
                "price scale cannot be built from empty data".to_owned(),
            ));
        }

        let (min, max) = bars
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), bar| {
                (min.min(bar.close), max.max(bar.close))
            });
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::DataRange(
                "close prices must be finite".to_owned(),
            ));
        }

        Self::new(min - PRICE_DOMAIN_PADDING, max, viewport)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn price_to_pixel(self, price: f64) -> f64 {
        self.linear.apply(price)
    }

    pub fn pixel_to_price(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(self.linear.invert(pixel))
    }
}
