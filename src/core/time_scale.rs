use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::{LinearScale, PriceBar, Viewport};
use crate::error::{ChartError, ChartResult};

/// Time axis mapping calendar time to horizontal pixels.
///
/// The domain is the exact first/last bar date, so gaps between bars (weekends,
/// holidays) keep their proportional width on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    /// Creates a scale over `[time_start, time_end]` unix seconds and `[0, width]` pixels.
    pub fn new(time_start: f64, time_end: f64, viewport: Viewport) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if time_start > time_end {
            return Err(ChartError::InvalidData(
                "time scale start must not be after its end".to_owned(),
            ));
        }
        let linear = LinearScale::new((time_start, time_end), (0.0, f64::from(viewport.width)))?;
        Ok(Self { linear })
    }

    /// Fits the domain to the first and last dates of date-ordered bars.
    pub fn from_bars(bars: &[PriceBar], viewport: Viewport) -> ChartResult<Self> {
        let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
            return Err(ChartError::DataRange(
                "time scale cannot be built from empty data".to_owned(),
            ));
        };

        let mut min = first.time();
        let mut max = last.time();
        // Dataset guarantees ordering; raw slices get a full pass.
        for bar in bars {
            min = min.min(bar.time());
            max = max.max(bar.time());
        }
        Self::new(min, max, viewport)
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
    pub fn width(self) -> f64 {
        self.linear.range().1
    }

    #[must_use]
    pub fn time_to_pixel(self, time: f64) -> f64 {
        self.linear.apply(time)
    }

    #[must_use]
    pub fn date_to_pixel(self, date: DateTime<Utc>) -> f64 {
        self.time_to_pixel(datetime_to_unix_seconds(date))
    }

    /// Inverts a pixel back to unix seconds. The result need not match any bar.
    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(self.linear.invert(pixel))
    }
}
