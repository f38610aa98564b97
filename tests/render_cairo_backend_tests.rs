#![cfg(feature = "cairo-backend")]

use chrono::{Duration, TimeZone, Utc};
use ohlc_chart::api::{ChartConfig, HeadlessContainer};
use ohlc_chart::core::{Dataset, PriceBar};
use ohlc_chart::render::CairoRenderer;
use ohlc_chart::{Chart, ChartError};

fn dataset() -> Dataset {
    let start = Utc
        .with_ymd_and_hms(2024, 10, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    let bars = (0..40)
        .map(|i| {
            let close = 80.0 + f64::from(i % 9);
            PriceBar::new(
                start + Duration::days(i64::from(i)),
                close,
                close + 2.0,
                close - 2.0,
                close,
                f64::from(100 + i * 3),
            )
        })
        .collect();
    Dataset::new(bars).expect("dataset")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_chart_and_crosshair() {
    let renderer = CairoRenderer::new(900, 500).expect("renderer");
    let mut chart = Chart::create(
        HeadlessContainer::new(900, 500),
        dataset(),
        renderer,
        ChartConfig::default(),
    )
    .expect("chart");

    let initial = chart.renderer().last_stats();
    assert_eq!(initial.rects_drawn, 40);
    assert!(initial.lines_drawn > 39);
    assert_eq!(initial.circles_drawn, 0);

    chart.pointer_move(300.0, 200.0).expect("pointer");
    let stats = chart.renderer().last_stats();
    assert_eq!(stats.circles_drawn, 1);
    assert_eq!(stats.polygons_drawn, 1);
    assert_eq!(stats.texts_drawn, initial.texts_drawn + 7);
}

#[test]
fn cairo_surface_follows_container_resize_and_encodes_png() {
    let renderer = CairoRenderer::new(640, 360).expect("renderer");
    let mut chart = Chart::create(
        HeadlessContainer::new(640, 360),
        dataset(),
        renderer,
        ChartConfig::default(),
    )
    .expect("chart");

    chart.container_mut().resize(1024, 600);
    chart.redraw().expect("redraw");

    let renderer = chart.into_renderer();
    assert_eq!(renderer.surface().width(), 1024);
    assert_eq!(renderer.surface().height(), 600);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}
