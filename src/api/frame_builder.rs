use crate::core::{
    BASIS_SAMPLES_PER_SPAN, ChartScales, MovingAveragePoint, PriceBar, Viewport, VolumeDirection,
    price_axis_ticks, project_average_points, project_close_points, project_volume_bars,
    segments_from_points, smooth_basis, time_axis_ticks,
};
use crate::error::ChartResult;
use crate::interaction::CrosshairState;
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, PolygonPrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

use super::{ChartConfig, ChartStyle};

const AXIS_LABEL_GAP_PX: f64 = 3.0;
const AXIS_LINE_WIDTH: f64 = 1.0;

/// Inputs of one draw pass, all derived from the same scales.
pub(super) struct FrameInputs<'a> {
    pub scales: &'a ChartScales,
    pub bars: &'a [PriceBar],
    pub moving_average: &'a [MovingAveragePoint],
    pub crosshair: &'a CrosshairState,
}

/// Translates plot-space geometry into container space.
#[derive(Clone, Copy)]
struct PlotOrigin {
    x: f64,
    y: f64,
}

impl PlotOrigin {
    fn axis_line(self, x1: f64, y1: f64, x2: f64, y2: f64, style: &ChartStyle) -> LinePrimitive {
        LinePrimitive::new(
            self.x + x1,
            self.y + y1,
            self.x + x2,
            self.y + y2,
            AXIS_LINE_WIDTH,
            style.axis_color,
        )
    }
}

/// Builds the full scene in container coordinates; plot geometry is shifted
/// by the left and top margins.
pub(super) fn build_frame(
    container: Viewport,
    config: &ChartConfig,
    inputs: &FrameInputs<'_>,
) -> ChartResult<RenderFrame> {
    let origin = PlotOrigin {
        x: f64::from(config.margins.left),
        y: f64::from(config.margins.top),
    };

    let mut frame = RenderFrame::new(container);
    push_axes(&mut frame, config, inputs.scales, origin)?;
    push_series(&mut frame, config, inputs, origin)?;
    push_crosshair(&mut frame, config, inputs.crosshair, origin);
    Ok(frame)
}

fn push_axes(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    scales: &ChartScales,
    origin: PlotOrigin,
) -> ChartResult<()> {
    let style = &config.style;
    let plot_width = f64::from(scales.viewport.width);
    let plot_height = f64::from(scales.viewport.height);
    let tick = style.axis_tick_size_px;

    // Time axis along the bottom edge.
    frame
        .lines
        .push(origin.axis_line(0.0, plot_height, plot_width, plot_height, style));
    for axis_tick in time_axis_ticks(scales.time, config.tick_count)? {
        if tick > 0.0 {
            frame.lines.push(origin.axis_line(
                axis_tick.position,
                plot_height,
                axis_tick.position,
                plot_height + tick,
                style,
            ));
        }
        frame.texts.push(TextPrimitive::new(
            axis_tick.label,
            origin.x + axis_tick.position,
            origin.y + plot_height + tick + AXIS_LABEL_GAP_PX,
            style.axis_font_size_px,
            style.axis_label_color,
            TextHAlign::Center,
        ));
    }

    // Price axis along the right edge.
    frame
        .lines
        .push(origin.axis_line(plot_width, 0.0, plot_width, plot_height, style));
    for axis_tick in price_axis_ticks(scales.price, config.tick_count) {
        if tick > 0.0 {
            frame.lines.push(origin.axis_line(
                plot_width,
                axis_tick.position,
                plot_width + tick,
                axis_tick.position,
                style,
            ));
        }
        frame.texts.push(
            TextPrimitive::new(
                axis_tick.label,
                origin.x + plot_width + tick + AXIS_LABEL_GAP_PX,
                origin.y + axis_tick.position,
                style.axis_font_size_px,
                style.axis_label_color,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }
    Ok(())
}

fn push_series(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    inputs: &FrameInputs<'_>,
    origin: PlotOrigin,
) -> ChartResult<()> {
    let style = &config.style;

    let close_points = project_close_points(inputs.bars, inputs.scales);
    for segment in segments_from_points(&close_points) {
        frame.lines.push(LinePrimitive::new(
            origin.x + segment.x1,
            origin.y + segment.y1,
            origin.x + segment.x2,
            origin.y + segment.y2,
            style.close_line_width,
            style.close_line_color,
        ));
    }

    let average_points = project_average_points(inputs.moving_average, inputs.scales);
    let smoothed = smooth_basis(&average_points, BASIS_SAMPLES_PER_SPAN);
    for segment in segments_from_points(&smoothed) {
        frame.lines.push(LinePrimitive::new(
            origin.x + segment.x1,
            origin.y + segment.y1,
            origin.x + segment.x2,
            origin.y + segment.y2,
            style.average_line_width,
            style.average_line_color,
        ));
    }

    for bar in project_volume_bars(inputs.bars, inputs.scales, config.volume_height_ratio)? {
        let color = match bar.direction {
            VolumeDirection::ClosedHigher => style.volume_higher_color,
            VolumeDirection::ClosedLower => style.volume_lower_color,
        };
        frame.rects.push(RectPrimitive::new(
            origin.x + bar.x,
            origin.y + bar.y_top,
            style.volume_bar_width,
            bar.height,
            color,
        ));
    }
    Ok(())
}

fn push_crosshair(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    crosshair: &CrosshairState,
    origin: PlotOrigin,
) {
    let Some(focus) = crosshair.focus.as_ref().filter(|_| crosshair.visible) else {
        return;
    };
    let style = &config.style;
    let x = origin.x + focus.x;
    let y = origin.y + focus.y;
    let dashed = LineStrokeStyle::Dashed {
        dash_px: style.crosshair_dash_px,
        gap_px: style.crosshair_dash_px,
    };

    frame.lines.push(
        LinePrimitive::new(
            x,
            y,
            x + focus.horizontal_guide_length,
            y,
            style.crosshair_line_width,
            style.crosshair_line_color,
        )
        .with_stroke_style(dashed),
    );
    frame.lines.push(
        LinePrimitive::new(
            x,
            y,
            x,
            y + focus.vertical_guide_length,
            style.crosshair_line_width,
            style.crosshair_line_color,
        )
        .with_stroke_style(dashed),
    );
    frame.circles.push(CirclePrimitive::new(
        x,
        y,
        config.crosshair.marker_radius_px,
        style.crosshair_marker_color,
    ));

    let tag = &focus.price_tag;
    let tag_x = origin.x + tag.anchor_x;
    let tag_y = origin.y + tag.anchor_y;
    frame.polygons.push(PolygonPrimitive::new(
        tag.outline
            .iter()
            .map(|(dx, dy)| (tag_x + dx, tag_y + dy))
            .collect(),
        style.price_tag_background,
    ));
    frame.texts.push(
        TextPrimitive::new(
            tag.label.clone(),
            origin.x + tag.label_x,
            tag_y,
            config.crosshair.label_font_size_px,
            style.overlay_text_color,
            TextHAlign::Left,
        )
        .with_v_align(TextVAlign::Middle),
    );

    for (row, text) in focus.legend.values().enumerate() {
        frame.texts.push(TextPrimitive::new(
            text.clone(),
            origin.x,
            origin.y + row as f64 * config.crosshair.legend_line_spacing_px,
            config.crosshair.label_font_size_px,
            style.overlay_text_color,
            TextHAlign::Left,
        ));
    }
}
