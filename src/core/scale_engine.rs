use serde::{Deserialize, Serialize};

use crate::core::{PriceBar, PriceScale, TimeScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Space reserved around the plot area for axes and labels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            top: 50,
            right: 100,
            bottom: 50,
            left: 50,
        }
    }
}

impl ChartMargins {
    /// Plot-area size left inside `container` once margins are removed.
    pub fn plot_viewport(self, container: Viewport) -> ChartResult<Viewport> {
        let width = container.width.checked_sub(self.left.saturating_add(self.right));
        let height = container.height.checked_sub(self.top.saturating_add(self.bottom));
        match (width, height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => {
                Ok(Viewport::new(width, height))
            }
            _ => Err(ChartError::InvalidViewport {
                width: container.width,
                height: container.height,
            }),
        }
    }

    /// Returns `true` when a container-space point falls inside the plot area.
    #[must_use]
    pub fn contains(self, container: Viewport, x: f64, y: f64) -> bool {
        let Ok(plot) = self.plot_viewport(container) else {
            return false;
        };
        let left = f64::from(self.left);
        let top = f64::from(self.top);
        (left..=left + f64::from(plot.width)).contains(&x)
            && (top..=top + f64::from(plot.height)).contains(&y)
    }
}

/// Time and price scales computed together for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub viewport: Viewport,
    pub time: TimeScale,
    pub price: PriceScale,
}

impl ChartScales {
    /// Pixel position of a bar's close on the plot.
    #[must_use]
    pub fn project_close(&self, bar: &PriceBar) -> (f64, f64) {
        (
            self.time.date_to_pixel(bar.date),
            self.price.price_to_pixel(bar.close),
        )
    }
}

/// Computes both scales from data extrema and the current plot viewport.
///
/// Pure: identical inputs always give bit-identical scales, so it is safe to
/// call on every resize.
pub fn compute_scales(bars: &[PriceBar], viewport: Viewport) -> ChartResult<ChartScales> {
    if bars.is_empty() {
        return Err(ChartError::DataRange(
            "cannot compute scales for an empty dataset".to_owned(),
        ));
    }
    let viewport = viewport.ensure_valid()?;

    Ok(ChartScales {
        viewport,
        time: TimeScale::from_bars(bars, viewport)?,
        price: PriceScale::from_closes(bars, viewport)?,
    })
}
