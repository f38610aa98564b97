use chrono::{DateTime, Utc};
use ohlc_chart::ChartError;
use ohlc_chart::data::{CandlePayload, decode_candle_payload, decode_candle_payload_str};
use serde_json::json;

#[test]
fn well_formed_ok_payload_yields_index_aligned_bars() {
    let payload = json!({
        "s": "ok",
        "t": [1_700_000_000, 1_700_086_400, 1_700_172_800],
        "o": [10.0, 11.0, 12.0],
        "h": [10.5, 11.5, 12.5],
        "l": [9.5, 10.5, 11.5],
        "c": [10.25, 11.25, 12.25],
        "v": [100, 200, 300]
    });

    let CandlePayload::Ok(dataset) = decode_candle_payload(&payload) else {
        panic!("expected ok payload");
    };
    assert_eq!(dataset.len(), 3);

    let second = dataset[1];
    assert_eq!(
        second.date,
        DateTime::<Utc>::from_timestamp(1_700_086_400, 0).expect("timestamp")
    );
    assert_eq!(second.open, 11.0);
    assert_eq!(second.high, 11.5);
    assert_eq!(second.low, 10.5);
    assert_eq!(second.close, 11.25);
    assert_eq!(second.volume, 200.0);
}

#[test]
fn no_data_payload_is_not_a_decode_error() {
    let payload = decode_candle_payload_str(r#"{"s":"no_data"}"#);
    assert_eq!(payload, CandlePayload::NoData);

    let err = payload.into_result("AAPL").expect_err("no data");
    assert!(err.is_no_data());
    assert!(matches!(err, ChartError::NoData { ref symbol } if symbol == "AAPL"));
}

#[test]
fn mismatched_lengths_fail_with_decode_error() {
    let payload = json!({
        "s": "ok",
        "t": [1, 2, 3],
        "o": [1.0, 2.0, 3.0],
        "h": [1.0, 2.0],
        "l": [1.0, 2.0, 3.0],
        "c": [1.0, 2.0, 3.0],
        "v": [1.0, 2.0, 3.0]
    });

    let err = decode_candle_payload(&payload)
        .into_result("MSFT")
        .expect_err("length mismatch");
    let ChartError::Decode(message) = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert!(message.contains("h: length 2 does not match `t` length 3"));
}

#[test]
fn every_failing_field_is_reported() {
    let payload = json!({
        "s": 7,
        "t": "soon",
        "o": [1.0, "x"],
        "c": [1.0]
    });

    let CandlePayload::Invalid(issues) = decode_candle_payload(&payload) else {
        panic!("expected invalid payload");
    };
    let fields: Vec<&str> = issues.iter().map(|issue| issue.field.as_str()).collect();
    assert_eq!(fields, vec!["s", "t", "o", "h", "l", "v"]);
}

#[test]
fn unknown_status_is_invalid() {
    let payload = json!({"s": "error", "t": [], "o": [], "h": [], "l": [], "c": [], "v": []});

    let CandlePayload::Invalid(issues) = decode_candle_payload(&payload) else {
        panic!("expected invalid payload");
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "s");
}

#[test]
fn non_object_and_non_json_bodies_are_invalid() {
    assert!(matches!(
        decode_candle_payload(&json!([1, 2, 3])),
        CandlePayload::Invalid(_)
    ));
    assert!(matches!(
        decode_candle_payload_str("<html>rate limited</html>"),
        CandlePayload::Invalid(_)
    ));
}

#[test]
fn fractional_timestamps_are_rejected_but_integral_floats_pass() {
    let base = json!({
        "s": "ok",
        "o": [1.0], "h": [1.0], "l": [1.0], "c": [1.0], "v": [1.0]
    });

    let mut integral = base.clone();
    integral["t"] = json!([1_700_000_000.0]);
    assert!(matches!(decode_candle_payload(&integral), CandlePayload::Ok(_)));

    let mut fractional = base;
    fractional["t"] = json!([1_700_000_000.5]);
    assert!(matches!(
        decode_candle_payload(&fractional),
        CandlePayload::Invalid(_)
    ));
}

#[test]
fn unordered_timestamps_are_a_decode_issue() {
    let payload = json!({
        "s": "ok",
        "t": [20, 10],
        "o": [1.0, 1.0], "h": [1.0, 1.0], "l": [1.0, 1.0], "c": [1.0, 1.0], "v": [1.0, 1.0]
    });

    let err = decode_candle_payload(&payload)
        .into_result("TSLA")
        .expect_err("unordered");
    assert!(matches!(err, ChartError::Decode(_)));
}

#[test]
fn empty_ok_payload_gives_empty_dataset() {
    let payload = json!({"s": "ok", "t": [], "o": [], "h": [], "l": [], "c": [], "v": []});
    let dataset = decode_candle_payload(&payload)
        .into_result("IBM")
        .expect("empty ok payload");
    assert!(dataset.is_empty());
}
