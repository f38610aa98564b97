use chrono::{DateTime, Duration, TimeZone, Utc};
use ohlc_chart::ChartError;
use ohlc_chart::core::{
    ChartMargins, LinearScale, PRICE_DOMAIN_PADDING, PriceBar, PriceScale, TimeScale, Viewport,
    compute_scales,
};

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date")
        + Duration::days(offset)
}

fn bar(offset: i64, close: f64) -> PriceBar {
    PriceBar::new(day(offset), close, close + 1.0, close - 1.0, close, 1_000.0)
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0)).expect("valid scale");

    let original = 42.5;
    let px = scale.apply(original);
    let recovered = scale.invert(px);

    assert!((px - 325.0).abs() <= 1e-9);
    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn linear_scale_rejects_non_finite_bounds() {
    let err = LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).expect_err("nan domain");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn degenerate_domain_maps_to_range_middle() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 800.0)).expect("valid scale");

    assert!(scale.is_degenerate());
    assert_eq!(scale.apply(5.0), 400.0);
    assert_eq!(scale.apply(1_000.0), 400.0);
    assert_eq!(scale.invert(123.0), 5.0);
}

#[test]
fn compute_scales_fails_on_empty_dataset() {
    let err = compute_scales(&[], Viewport::new(800, 400)).expect_err("empty data");
    assert!(matches!(err, ChartError::DataRange(_)));
}

#[test]
fn compute_scales_rejects_invalid_viewport() {
    let bars = vec![bar(0, 10.0), bar(1, 11.0)];
    let err = compute_scales(&bars, Viewport::new(0, 400)).expect_err("zero width");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 400
        }
    ));
}

#[test]
fn compute_scales_fits_time_and_padded_price_domain() {
    let bars = vec![bar(0, 20.0), bar(1, 35.0), bar(3, 12.0)];
    let scales = compute_scales(&bars, Viewport::new(600, 300)).expect("scales");

    assert_eq!(scales.time.domain(), (bars[0].time(), bars[2].time()));
    assert_eq!(scales.time.range(), (0.0, 600.0));
    assert_eq!(scales.price.domain(), (12.0 - PRICE_DOMAIN_PADDING, 35.0));
    assert_eq!(scales.price.range(), (300.0, 0.0));

    assert_eq!(scales.time.date_to_pixel(bars[0].date), 0.0);
    assert_eq!(scales.time.date_to_pixel(bars[2].date), 600.0);
    assert_eq!(scales.price.price_to_pixel(35.0), 0.0);
    assert_eq!(scales.price.price_to_pixel(12.0 - PRICE_DOMAIN_PADDING), 300.0);
}

#[test]
fn calendar_gaps_keep_proportional_width() {
    let bars = vec![bar(0, 10.0), bar(1, 10.0), bar(4, 10.0)];
    let scales = compute_scales(&bars, Viewport::new(400, 200)).expect("scales");

    let x1 = scales.time.date_to_pixel(bars[1].date);
    assert!((x1 - 100.0).abs() <= 1e-9);
}

#[test]
fn compute_scales_is_bit_identical_for_identical_inputs() {
    let bars = vec![bar(0, 101.25), bar(2, 99.5), bar(5, 104.75)];
    let viewport = Viewport::new(1024, 512);

    let first = compute_scales(&bars, viewport).expect("first");
    let second = compute_scales(&bars, viewport).expect("second");

    assert_eq!(first, second);
    assert_eq!(
        first.price.domain().0.to_bits(),
        second.price.domain().0.to_bits()
    );
}

#[test]
fn single_bar_places_point_mid_plot() {
    let bars = vec![bar(0, 50.0)];
    let scales = compute_scales(&bars, Viewport::new(500, 300)).expect("scales");

    assert_eq!(scales.time.date_to_pixel(bars[0].date), 250.0);
    assert_eq!(scales.price.domain(), (45.0, 50.0));
}

#[test]
fn time_scale_rejects_reversed_domain() {
    let err = TimeScale::new(10.0, 5.0, Viewport::new(100, 100)).expect_err("reversed");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn pixel_inversion_rejects_non_finite_input() {
    let price = PriceScale::new(0.0, 10.0, Viewport::new(100, 100)).expect("price scale");
    let time = TimeScale::new(0.0, 10.0, Viewport::new(100, 100)).expect("time scale");

    assert!(price.pixel_to_price(f64::INFINITY).is_err());
    assert!(time.pixel_to_time(f64::NAN).is_err());
    assert_eq!(price.pixel_to_price(100.0).expect("bottom"), 0.0);
}

#[test]
fn margins_shrink_container_to_plot_area() {
    let margins = ChartMargins::default();
    let plot = margins
        .plot_viewport(Viewport::new(800, 500))
        .expect("plot viewport");

    assert_eq!(plot, Viewport::new(650, 400));
}

#[test]
fn margins_reject_container_smaller_than_margins() {
    let err = ChartMargins::default()
        .plot_viewport(Viewport::new(150, 500))
        .expect_err("no room for plot");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 150,
            height: 500
        }
    ));
}

#[test]
fn margins_contains_checks_plot_bounds() {
    let margins = ChartMargins::default();
    let container = Viewport::new(800, 500);

    assert!(margins.contains(container, 50.0, 50.0));
    assert!(margins.contains(container, 700.0, 450.0));
    assert!(!margins.contains(container, 49.0, 100.0));
    assert!(!margins.contains(container, 701.0, 100.0));
    assert!(!margins.contains(container, 100.0, 451.0));
}
