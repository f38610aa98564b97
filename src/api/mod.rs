//! Host-facing chart handle.
//!
//! A `Chart` owns its container, dataset and renderer. The host calls
//! `redraw` after anything that may have changed the container size, and
//! forwards pointer events through `pointer_move`/`pointer_leave`.

mod chart_config;
mod container;
mod frame_builder;

use tracing::{debug, trace};

use crate::core::{
    ChartScales, Dataset, MovingAveragePoint, Viewport, compute_scales, compute_sma,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CrosshairFocus, CrosshairState, InteractionState, locate_nearest};
use crate::render::Renderer;

pub use chart_config::{ChartConfig, ChartStyle};
pub use container::{ChartContainer, ContainerKind, HeadlessContainer};

use frame_builder::{FrameInputs, build_frame};

/// Interactive OHLC chart mounted into one container.
pub struct Chart<C: ChartContainer, R: Renderer> {
    container: C,
    renderer: R,
    dataset: Dataset,
    config: ChartConfig,
    viewport: Viewport,
    scales: ChartScales,
    moving_average: Vec<MovingAveragePoint>,
    interaction: InteractionState,
}

impl<C: ChartContainer, R: Renderer> Chart<C, R> {
    /// Mounts a chart and performs the first draw.
    ///
    /// The container must be an empty block; any other target fails with
    /// `Precondition` before anything is rendered.
    pub fn create(
        container: C,
        dataset: Dataset,
        renderer: R,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        ensure_mountable(&container)?;
        let config = config.validate()?;
        let (viewport, scales) = layout(&container, &dataset, &config)?;

        let mut chart = Self {
            container,
            renderer,
            dataset,
            config,
            viewport,
            scales,
            moving_average: Vec::new(),
            interaction: InteractionState::default(),
        };
        chart.redraw()?;
        debug!(bars = chart.dataset.len(), "chart created");
        Ok(chart)
    }

    /// Recomputes scales and the moving average for the current container
    /// size and renders a full frame.
    ///
    /// A visible crosshair is re-resolved against the new scales at the last
    /// plot-relative pointer position, or hidden when that position falls
    /// outside the resized plot.
    pub fn redraw(&mut self) -> ChartResult<()> {
        let (container, scales) = layout(&self.container, &self.dataset, &self.config)?;
        let moving_average = compute_sma(&self.dataset, self.config.sma_window);

        if let Some((x, y)) = self.interaction.pointer() {
            let left = f64::from(self.config.margins.left);
            let top = f64::from(self.config.margins.top);
            if self.config.margins.contains(container, x + left, y + top) {
                let nearest = locate_nearest(x, scales.time, &self.dataset)?;
                self.interaction.set_focus(Some(CrosshairFocus::resolve(
                    nearest,
                    &scales,
                    self.config.crosshair,
                )));
            } else {
                trace!(x, y, "pointer outside resized plot");
                self.interaction.on_pointer_leave();
            }
        }

        self.viewport = container;
        self.scales = scales;
        self.moving_average = moving_average;
        debug!(
            width = container.width,
            height = container.height,
            plot_width = scales.viewport.width,
            plot_height = scales.viewport.height,
            averages = self.moving_average.len(),
            "redraw"
        );
        self.render(container)
    }

    /// Handles a pointer position in container coordinates.
    ///
    /// Hit-testing uses the layout of the last draw, so a resize takes effect
    /// only after `redraw`. Positions outside the plot area hide the crosshair.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<&CrosshairState> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        let container = self.viewport;
        if !self.config.margins.contains(container, x, y) {
            self.interaction.on_pointer_leave();
            self.render(container)?;
            return Ok(self.interaction.crosshair());
        }

        let plot_x = x - f64::from(self.config.margins.left);
        let plot_y = y - f64::from(self.config.margins.top);
        let nearest = locate_nearest(plot_x, self.scales.time, &self.dataset)?;
        trace!(plot_x, index = nearest.index, "crosshair focus");

        self.interaction.on_pointer_move(plot_x, plot_y);
        self.interaction.set_focus(Some(CrosshairFocus::resolve(
            nearest,
            &self.scales,
            self.config.crosshair,
        )));
        self.render(container)?;
        Ok(self.interaction.crosshair())
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        trace!("crosshair hidden");
        self.interaction.on_pointer_leave();
        self.render(self.viewport)
    }

    #[must_use]
    pub fn scales(&self) -> ChartScales {
        self.scales
    }

    #[must_use]
    pub fn moving_average(&self) -> &[MovingAveragePoint] {
        &self.moving_average
    }

    #[must_use]
    pub fn crosshair(&self) -> &CrosshairState {
        self.interaction.crosshair()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable container access; call `redraw` after changing its size.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn render(&mut self, container: Viewport) -> ChartResult<()> {
        let frame = build_frame(
            container,
            &self.config,
            &FrameInputs {
                scales: &self.scales,
                bars: &self.dataset,
                moving_average: &self.moving_average,
                crosshair: self.interaction.crosshair(),
            },
        )?;
        self.renderer.render(&frame)
    }
}

fn ensure_mountable<C: ChartContainer>(container: &C) -> ChartResult<()> {
    match container.kind() {
        ContainerKind::Block => {}
        ContainerKind::Other(kind) => {
            return Err(ChartError::Precondition(format!(
                "chart container must be a block element, got `{kind}`"
            )));
        }
    }
    if container.has_content() {
        return Err(ChartError::Precondition(
            "chart container must be empty".to_owned(),
        ));
    }
    Ok(())
}

fn layout<C: ChartContainer>(
    container: &C,
    dataset: &Dataset,
    config: &ChartConfig,
) -> ChartResult<(Viewport, ChartScales)> {
    let size = container.size().ensure_valid()?;
    let plot = config.margins.plot_viewport(size)?;
    Ok((size, compute_scales(dataset, plot)?))
}
