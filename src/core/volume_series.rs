use serde::{Deserialize, Serialize};

use crate::core::{ChartScales, LinearScale, PriceBar};
use crate::error::{ChartError, ChartResult};

/// Share of the plot height the tallest volume bar may take.
pub const DEFAULT_VOLUME_HEIGHT_RATIO: f64 = 0.25;

/// Direction of a volume bar's close relative to the previous volume bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeDirection {
    ClosedHigher,
    ClosedLower,
}

/// Deterministic volume bar geometry, bottom-anchored on the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub index: usize,
    pub x: f64,
    pub y_top: f64,
    pub height: f64,
    pub direction: VolumeDirection,
}

/// Projects non-zero volumes into bars along the bottom of the plot.
///
/// Volume maps linearly from `[min, max]` of the kept bars onto
/// `[0, height_ratio * plot height]`, so the smallest volume gets a zero-height
/// bar. Colour direction compares each kept bar with the previous kept bar;
/// the first one always counts as closing higher.
pub fn project_volume_bars(
    bars: &[PriceBar],
    scales: &ChartScales,
    height_ratio: f64,
) -> ChartResult<Vec<VolumeBar>> {
    if !height_ratio.is_finite() || !(0.0..=1.0).contains(&height_ratio) {
        return Err(ChartError::InvalidData(
            "volume height ratio must be finite and in [0, 1]".to_owned(),
        ));
    }

    let kept: Vec<(usize, &PriceBar)> = bars
        .iter()
        .enumerate()
        .filter(|(_, bar)| bar.volume != 0.0)
        .collect();
    if kept.is_empty() {
        return Ok(Vec::new());
    }

    let (min_volume, max_volume) = kept
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (_, bar)| {
            (min.min(bar.volume), max.max(bar.volume))
        });

    let plot_height = f64::from(scales.viewport.height);
    let max_bar_height = plot_height * height_ratio;
    let volume_scale = LinearScale::new((min_volume, max_volume), (max_bar_height, 0.0))?;
    let baseline_offset = plot_height - max_bar_height;

    let mut out = Vec::with_capacity(kept.len());
    let mut previous_close = -1.0;
    for (index, bar) in kept {
        let scaled = volume_scale.apply(bar.volume);
        let direction = if previous_close > bar.close {
            VolumeDirection::ClosedLower
        } else {
            VolumeDirection::ClosedHigher
        };
        out.push(VolumeBar {
            index,
            x: scales.time.date_to_pixel(bar.date),
            y_top: scaled + baseline_offset,
            height: max_bar_height - scaled,
            direction,
        });
        previous_close = bar.close;
    }

    Ok(out)
}
