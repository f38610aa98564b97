use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::PriceBar;

/// Window used when the caller does not choose one.
pub const DEFAULT_SMA_WINDOW: usize = 50;

/// One smoothed close value aligned with the bar it was computed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAveragePoint {
    pub date: DateTime<Utc>,
    pub average: f64,
}

/// Trailing simple moving average of closes.
///
/// Point `i` averages closes over `[max(0, i - window), i]`, so the first
/// `window` points use a shorter window instead of being undefined. Output has
/// the same length as the input.
#[must_use]
pub fn compute_sma(bars: &[PriceBar], window: usize) -> Vec<MovingAveragePoint> {
    bars.iter()
        .enumerate()
        .map(|(index, bar)| {
            let subset = &bars[index.saturating_sub(window)..=index];
            let sum: f64 = subset.iter().map(|entry| entry.close).sum();
            MovingAveragePoint {
                date: bar.date,
                average: sum / subset.len() as f64,
            }
        })
        .collect()
}

#[must_use]
pub fn compute_default_sma(bars: &[PriceBar]) -> Vec<MovingAveragePoint> {
    compute_sma(bars, DEFAULT_SMA_WINDOW)
}
