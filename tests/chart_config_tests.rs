use ohlc_chart::ChartError;
use ohlc_chart::api::{ChartConfig, ChartStyle};
use ohlc_chart::core::{ChartMargins, DEFAULT_SMA_WINDOW};
use ohlc_chart::render::Color;

#[test]
fn default_config_matches_chart_layout() {
    let config = ChartConfig::default();

    assert_eq!(
        config.margins,
        ChartMargins {
            top: 50,
            right: 100,
            bottom: 50,
            left: 50
        }
    );
    assert_eq!(config.sma_window, DEFAULT_SMA_WINDOW);
    assert_eq!(config.volume_height_ratio, 0.25);
    assert_eq!(config.tick_count, 10);
    assert_eq!(config.crosshair.legend_line_spacing_px, 20.0);
    assert_eq!(
        config.style.close_line_color,
        Color::from_rgb8(0x46, 0x82, 0xb4)
    );
    config.validate().expect("default config is valid");
}

#[test]
fn config_json_round_trip() {
    let config = ChartConfig::default()
        .with_sma_window(20)
        .with_margins(ChartMargins {
            top: 10,
            right: 60,
            bottom: 30,
            left: 40,
        });

    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let parsed = ChartConfig::from_json_str(r#"{"sma_window": 7}"#).expect("parse");

    assert_eq!(parsed.sma_window, 7);
    assert_eq!(parsed.margins, ChartMargins::default());
    assert_eq!(parsed.style, ChartStyle::default());
}

#[test]
fn invalid_values_are_rejected() {
    let err = ChartConfig::from_json_str(r#"{"tick_count": 0}"#).expect_err("zero ticks");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ChartConfig::from_json_str(r#"{"volume_height_ratio": 2.0}"#)
        .expect_err("ratio above one");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ChartConfig::from_json_str("{not json").expect_err("syntax");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn style_validation_checks_colors_and_widths() {
    let mut style = ChartStyle::default();
    style.average_line_color = Color::rgba(1.2, 0.0, 0.0, 1.0);
    assert!(style.validate().is_err());

    let mut style = ChartStyle::default();
    style.close_line_width = 0.0;
    assert!(style.validate().is_err());

    let mut style = ChartStyle::default();
    style.axis_tick_size_px = 0.0;
    assert!(style.validate().is_ok());
}
