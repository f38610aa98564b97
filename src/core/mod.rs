pub mod axis_ticks;
pub mod line_series;
pub mod moving_average;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod scale_engine;
pub mod time_scale;
pub mod types;
pub mod volume_series;

pub use axis_ticks::{
    AxisTick, DEFAULT_TICK_COUNT, TimeTickInterval, format_time_tick, nice_ticks,
    price_axis_ticks, tick_step, time_axis_ticks,
};
pub use line_series::{
    BASIS_SAMPLES_PER_SPAN, LineSegment, project_average_points, project_close_points,
    segments_from_points, smooth_basis,
};
pub use moving_average::{
    DEFAULT_SMA_WINDOW, MovingAveragePoint, compute_default_sma, compute_sma,
};
pub use price_scale::{PRICE_DOMAIN_PADDING, PriceScale};
pub use scale::LinearScale;
pub use scale_engine::{ChartMargins, ChartScales, compute_scales};
pub use time_scale::TimeScale;
pub use types::{Dataset, PriceBar, Viewport};
pub use volume_series::{
    DEFAULT_VOLUME_HEIGHT_RATIO, VolumeBar, VolumeDirection, project_volume_bars,
};
