use serde::{Deserialize, Serialize};

use crate::core::{
    ChartMargins, DEFAULT_SMA_WINDOW, DEFAULT_TICK_COUNT, DEFAULT_VOLUME_HEIGHT_RATIO,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::CrosshairConfig;
use crate::render::Color;

/// Colors and stroke sizes used by the frame builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub axis_color: Color,
    pub axis_label_color: Color,
    pub axis_font_size_px: f64,
    pub axis_tick_size_px: f64,
    pub close_line_color: Color,
    pub close_line_width: f64,
    pub average_line_color: Color,
    pub average_line_width: f64,
    pub volume_higher_color: Color,
    pub volume_lower_color: Color,
    pub volume_bar_width: f64,
    pub crosshair_line_color: Color,
    pub crosshair_line_width: f64,
    pub crosshair_dash_px: f64,
    pub crosshair_marker_color: Color,
    pub price_tag_background: Color,
    pub overlay_text_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let white = Color::rgb(1.0, 1.0, 1.0);
        Self {
            axis_color: Color::rgba(1.0, 1.0, 1.0, 0.6),
            axis_label_color: white,
            axis_font_size_px: 10.0,
            axis_tick_size_px: 6.0,
            close_line_color: Color::from_rgb8(0x46, 0x82, 0xb4),
            close_line_width: 1.5,
            average_line_color: Color::from_rgb8(0xff, 0x89, 0x00),
            average_line_width: 1.0,
            volume_higher_color: Color::from_rgb8(0x03, 0xa6, 0x78),
            volume_lower_color: Color::from_rgb8(0xc0, 0x39, 0x2b),
            volume_bar_width: 1.0,
            crosshair_line_color: Color::from_rgb8(0x67, 0x80, 0x9f),
            crosshair_line_width: 1.5,
            crosshair_dash_px: 3.0,
            crosshair_marker_color: white,
            price_tag_background: Color::rgba(1.0, 1.0, 1.0, 0.1),
            overlay_text_color: white,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.axis_color,
            self.axis_label_color,
            self.close_line_color,
            self.average_line_color,
            self.volume_higher_color,
            self.volume_lower_color,
            self.crosshair_line_color,
            self.crosshair_marker_color,
            self.price_tag_background,
            self.overlay_text_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("axis font size", self.axis_font_size_px),
            ("close line width", self.close_line_width),
            ("average line width", self.average_line_width),
            ("volume bar width", self.volume_bar_width),
            ("crosshair line width", self.crosshair_line_width),
            ("crosshair dash", self.crosshair_dash_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style {name} must be finite and > 0"
                )));
            }
        }
        if !self.axis_tick_size_px.is_finite() || self.axis_tick_size_px < 0.0 {
            return Err(ChartError::InvalidData(
                "style axis tick size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Chart setup supplied by the host at creation time.
///
/// Serializable so hosts can persist/load chart setup as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub margins: ChartMargins,
    #[serde(default = "default_sma_window")]
    pub sma_window: usize,
    #[serde(default = "default_volume_height_ratio")]
    pub volume_height_ratio: f64,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub crosshair: CrosshairConfig,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: ChartMargins::default(),
            sma_window: default_sma_window(),
            volume_height_ratio: default_volume_height_ratio(),
            tick_count: default_tick_count(),
            crosshair: CrosshairConfig::default(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_margins(mut self, margins: ChartMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_sma_window(mut self, sma_window: usize) -> Self {
        self.sma_window = sma_window;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.volume_height_ratio.is_finite() || !(0.0..=1.0).contains(&self.volume_height_ratio)
        {
            return Err(ChartError::InvalidData(
                "volume height ratio must be finite and in [0, 1]".to_owned(),
            ));
        }
        if self.tick_count == 0 {
            return Err(ChartError::InvalidData(
                "tick count must be > 0".to_owned(),
            ));
        }
        self.crosshair.validate()?;
        self.style.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }
}

fn default_sma_window() -> usize {
    DEFAULT_SMA_WINDOW
}

fn default_volume_height_ratio() -> f64 {
    DEFAULT_VOLUME_HEIGHT_RATIO
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}
