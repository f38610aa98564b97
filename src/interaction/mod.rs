mod locator;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::format_fixed_2;
use crate::core::{ChartScales, PriceBar};
use crate::error::{ChartError, ChartResult};

pub use locator::{NearestBar, locate_nearest};

/// Crosshair overlay sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairConfig {
    pub marker_radius_px: f64,
    pub price_tag_triangle_px: f64,
    pub price_tag_margin_px: f64,
    pub label_font_size_px: f64,
    pub legend_line_spacing_px: f64,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            marker_radius_px: 3.0,
            price_tag_triangle_px: 10.0,
            price_tag_margin_px: 5.0,
            label_font_size_px: 12.0,
            legend_line_spacing_px: 20.0,
        }
    }
}

impl CrosshairConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("marker radius", self.marker_radius_px),
            ("price tag triangle", self.price_tag_triangle_px),
            ("price tag margin", self.price_tag_margin_px),
            ("label font size", self.label_font_size_px),
            ("legend line spacing", self.legend_line_spacing_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "crosshair {name} must be finite and >= 0"
                )));
            }
        }
        if self.label_font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "crosshair label font size must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Rough text box for a label; there is no font metrics source here.
    #[must_use]
    pub fn estimate_label_box(self, text: &str) -> (f64, f64) {
        let width = text.chars().count() as f64 * self.label_font_size_px * 0.6;
        let height = self.label_font_size_px * 1.2;
        (width, height)
    }
}

/// Legend rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegendKey {
    Date,
    Open,
    Close,
    High,
    Low,
    Volume,
}

impl LegendKey {
    pub const ORDER: [Self; 6] = [
        Self::Date,
        Self::Open,
        Self::Close,
        Self::High,
        Self::Low,
        Self::Volume,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Open => "open",
            Self::Close => "close",
            Self::High => "high",
            Self::Low => "low",
            Self::Volume => "volume",
        }
    }

    #[must_use]
    pub fn format(self, bar: &PriceBar) -> String {
        let value = match self {
            Self::Date => bar.date.format("%Y-%m-%d").to_string(),
            Self::Open => format_fixed_2(bar.open),
            Self::Close => format_fixed_2(bar.close),
            Self::High => format_fixed_2(bar.high),
            Self::Low => format_fixed_2(bar.low),
            Self::Volume => format_fixed_2(bar.volume),
        };
        format!("{}: {value}", self.label())
    }
}

/// Tag outline: a rectangle with a left-pointing triangle, anchored at `(0, 0)`.
#[must_use]
pub fn price_tag_polygon(
    height: f64,
    width: f64,
    triangle_size: f64,
    margin: f64,
) -> [(f64, f64); 5] {
    let half_height = height / 2.0;
    let width = width + triangle_size + margin;
    [
        (0.0, 0.0),
        (triangle_size, -half_height),
        (width, -half_height),
        (width, half_height),
        (triangle_size, half_height),
    ]
}

/// Price label pinned to the right plot edge at the focused close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTag {
    pub label: String,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub label_x: f64,
    /// Outline relative to the anchor.
    pub outline: [(f64, f64); 5],
}

/// Everything the overlay needs for the bar under the pointer, in plot space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairFocus {
    pub index: usize,
    pub bar: PriceBar,
    pub x: f64,
    pub y: f64,
    /// Horizontal guide runs from `x` to the right plot edge.
    pub horizontal_guide_length: f64,
    /// Vertical guide runs from `y` down to the time axis.
    pub vertical_guide_length: f64,
    pub price_tag: PriceTag,
    pub legend: IndexMap<LegendKey, String>,
}

impl CrosshairFocus {
    #[must_use]
    pub fn resolve(nearest: NearestBar, scales: &ChartScales, config: CrosshairConfig) -> Self {
        let NearestBar { index, bar } = nearest;
        let (x, y) = scales.project_close(&bar);
        let plot_width = f64::from(scales.viewport.width);
        let plot_height = f64::from(scales.viewport.height);

        let label = format_fixed_2(bar.close);
        let (label_width, label_height) = config.estimate_label_box(&label);
        let price_tag = PriceTag {
            anchor_x: plot_width,
            anchor_y: y,
            label_x: plot_width + config.price_tag_triangle_px,
            outline: price_tag_polygon(
                label_height,
                label_width,
                config.price_tag_triangle_px,
                config.price_tag_margin_px,
            ),
            label,
        };

        let legend = LegendKey::ORDER
            .into_iter()
            .map(|key| (key, key.format(&bar)))
            .collect();

        Self {
            index,
            bar,
            x,
            y,
            horizontal_guide_length: plot_width - x,
            vertical_guide_length: plot_height - y,
            price_tag,
            legend,
        }
    }
}

/// Public crosshair state exposed to hosts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub focus: Option<CrosshairFocus>,
}

/// Pointer tracking for one chart. Positions are plot-relative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pointer: Option<(f64, f64)>,
    crosshair: CrosshairState,
}

impl InteractionState {
    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    #[must_use]
    pub fn crosshair(&self) -> &CrosshairState {
        &self.crosshair
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
        self.crosshair.visible = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.crosshair = CrosshairState::default();
    }

    pub fn set_focus(&mut self, focus: Option<CrosshairFocus>) {
        self.crosshair.focus = focus;
    }
}
