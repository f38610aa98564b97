use chrono::{TimeZone, Utc};
use ohlc_chart::core::{PriceBar, Viewport, compute_scales};
use ohlc_chart::interaction::{
    CrosshairConfig, CrosshairFocus, InteractionState, LegendKey, NearestBar, price_tag_polygon,
};

fn sample_bar() -> PriceBar {
    PriceBar::new(
        Utc.with_ymd_and_hms(2024, 8, 9, 0, 0, 0)
            .single()
            .expect("valid date"),
        101.006,
        103.5,
        99.125,
        102.344,
        123_456.0,
    )
}

#[test]
fn price_tag_outline_points_left() {
    let outline = price_tag_polygon(14.4, 30.0, 10.0, 5.0);

    assert_eq!(
        outline,
        [
            (0.0, 0.0),
            (10.0, -7.2),
            (45.0, -7.2),
            (45.0, 7.2),
            (10.0, 7.2),
        ]
    );
}

#[test]
fn legend_rows_follow_fixed_order_and_format() {
    let bar = sample_bar();
    let rows: Vec<String> = LegendKey::ORDER.iter().map(|key| key.format(&bar)).collect();

    assert_eq!(
        rows,
        vec![
            "date: 2024-08-09",
            "open: 101.01",
            "close: 102.34",
            "high: 103.50",
            "low: 99.13",
            "volume: 123456.00",
        ]
    );
}

#[test]
fn focus_resolves_guides_tag_and_legend() {
    let bar = sample_bar();
    let scales = compute_scales(&[bar], Viewport::new(600, 300)).expect("scales");
    let config = CrosshairConfig::default();

    let focus = CrosshairFocus::resolve(NearestBar { index: 0, bar }, &scales, config);

    assert_eq!(focus.x, 300.0);
    assert_eq!(focus.y, 0.0);
    assert_eq!(focus.horizontal_guide_length, 300.0);
    assert_eq!(focus.vertical_guide_length, 300.0);
    assert_eq!(focus.price_tag.label, "102.34");
    assert_eq!(focus.price_tag.anchor_x, 600.0);
    assert_eq!(focus.price_tag.label_x, 610.0);
    let keys: Vec<LegendKey> = focus.legend.keys().copied().collect();
    assert_eq!(keys, LegendKey::ORDER.to_vec());
}

#[test]
fn label_box_estimate_scales_with_text_and_font() {
    let config = CrosshairConfig::default();
    let (width, height) = config.estimate_label_box("102.34");

    assert!((width - 6.0 * 12.0 * 0.6).abs() <= 1e-9);
    assert!((height - 14.4).abs() <= 1e-9);
}

#[test]
fn crosshair_config_rejects_bad_values() {
    let mut config = CrosshairConfig::default();
    config.label_font_size_px = 0.0;
    assert!(config.validate().is_err());

    let mut config = CrosshairConfig::default();
    config.marker_radius_px = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn interaction_state_tracks_pointer_lifecycle() {
    let mut state = InteractionState::default();
    assert!(state.pointer().is_none());
    assert!(!state.crosshair().visible);

    state.on_pointer_move(12.0, 34.0);
    assert_eq!(state.pointer(), Some((12.0, 34.0)));
    assert!(state.crosshair().visible);

    state.on_pointer_leave();
    assert!(state.pointer().is_none());
    assert!(!state.crosshair().visible);
    assert!(state.crosshair().focus.is_none());
}
