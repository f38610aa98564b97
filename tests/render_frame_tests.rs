use chrono::{Duration, TimeZone, Utc};
use ohlc_chart::api::{ChartConfig, HeadlessContainer};
use ohlc_chart::core::{Dataset, PriceBar, Viewport};
use ohlc_chart::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, NullRenderer, PolygonPrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};
use ohlc_chart::{Chart, ChartError};

fn white() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

#[test]
fn frame_validation_rejects_bad_primitives() {
    let base = RenderFrame::new(Viewport::new(100, 100));
    assert!(base.is_empty());
    base.validate().expect("empty frame is valid");

    let frame = base
        .clone()
        .with_line(LinePrimitive::new(0.0, 0.0, f64::NAN, 1.0, 1.0, white()));
    assert!(matches!(frame.validate(), Err(ChartError::InvalidData(_))));

    let frame = base
        .clone()
        .with_rect(RectPrimitive::new(0.0, 0.0, 1.0, -2.0, white()));
    assert!(frame.validate().is_err());

    let frame = base.clone().with_text(TextPrimitive::new(
        String::new(),
        0.0,
        0.0,
        12.0,
        white(),
        TextHAlign::Left,
    ));
    assert!(frame.validate().is_err());

    let mut frame = base.clone();
    frame
        .polygons
        .push(PolygonPrimitive::new(vec![(0.0, 0.0), (1.0, 1.0)], white()));
    assert!(frame.validate().is_err());

    let mut frame = base;
    frame
        .circles
        .push(CirclePrimitive::new(5.0, 5.0, -1.0, white()));
    assert!(frame.validate().is_err());
}

#[test]
fn dashed_lines_need_positive_dash() {
    let line = LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, white()).with_stroke_style(
        LineStrokeStyle::Dashed {
            dash_px: 0.0,
            gap_px: 3.0,
        },
    );
    assert!(line.validate().is_err());
}

#[test]
fn invalid_viewport_frame_is_rejected() {
    let frame = RenderFrame::new(Viewport::new(0, 10));
    assert!(matches!(
        frame.validate(),
        Err(ChartError::InvalidViewport { .. })
    ));
}

#[test]
fn null_renderer_keeps_last_frame() {
    let mut renderer = NullRenderer::default();
    let frame = RenderFrame::new(Viewport::new(50, 50))
        .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, white()))
        .with_text(
            TextPrimitive::new("x".to_owned(), 1.0, 1.0, 10.0, white(), TextHAlign::Center)
                .with_v_align(TextVAlign::Middle),
        );

    renderer.render(&frame).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(renderer.last_frame.as_ref(), Some(&frame));
}

fn chart_frame() -> RenderFrame {
    let start = Utc
        .with_ymd_and_hms(2024, 9, 2, 0, 0, 0)
        .single()
        .expect("valid date");
    let bars = (0..30)
        .map(|i| {
            let close = 50.0 + f64::from(i % 7);
            PriceBar::new(
                start + Duration::days(i64::from(i)),
                close,
                close + 1.0,
                close - 1.0,
                close,
                f64::from(1 + i) * 10.0,
            )
        })
        .collect();
    let mut chart = Chart::create(
        HeadlessContainer::new(900, 600),
        Dataset::new(bars).expect("dataset"),
        NullRenderer::default(),
        ChartConfig::default(),
    )
    .expect("chart");
    chart.pointer_move(400.0, 300.0).expect("pointer");
    chart
        .into_renderer()
        .last_frame
        .expect("frame after pointer move")
}

#[test]
fn chart_frame_is_offset_by_margins() {
    let frame = chart_frame();
    let config = ChartConfig::default();

    assert_eq!(frame.viewport, Viewport::new(900, 600));
    // Volume bars sit on the plot bottom edge at top margin + plot height.
    let bottom = f64::from(config.margins.top) + 500.0;
    for rect in &frame.rects {
        assert!((rect.y + rect.height - bottom).abs() <= 1e-9);
        assert!(rect.x >= 50.0 && rect.x <= 800.0);
    }

    let close_lines = frame
        .lines
        .iter()
        .filter(|line| line.color == config.style.close_line_color)
        .count();
    assert_eq!(close_lines, 29);

    let average_lines = frame
        .lines
        .iter()
        .filter(|line| line.color == config.style.average_line_color)
        .count();
    assert!(average_lines > 29);
}

#[test]
fn chart_frame_draws_dashed_crosshair_and_legend() {
    let frame = chart_frame();

    let dashed: Vec<&LinePrimitive> = frame
        .lines
        .iter()
        .filter(|line| matches!(line.stroke_style, LineStrokeStyle::Dashed { .. }))
        .collect();
    assert_eq!(dashed.len(), 2);
    // Horizontal guide ends on the price axis, vertical guide on the time axis.
    assert!(
        dashed
            .iter()
            .any(|line| line.y1 == line.y2 && (line.x2 - 800.0).abs() <= 1e-9)
    );
    assert!(
        dashed
            .iter()
            .any(|line| line.x1 == line.x2 && (line.y2 - 550.0).abs() <= 1e-9)
    );

    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.polygons.len(), 1);
    let legend: Vec<&TextPrimitive> = frame
        .texts
        .iter()
        .filter(|text| text.x == 50.0 && text.h_align == TextHAlign::Left)
        .collect();
    assert_eq!(legend.len(), 6);
    assert!(legend[0].text.starts_with("date: "));
    assert_eq!(legend[1].y - legend[0].y, 20.0);
}
