use std::fmt;

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::core::{Dataset, PriceBar};
use crate::error::{ChartError, ChartResult};

const STATUS_OK: &str = "ok";
const STATUS_NO_DATA: &str = "no_data";
const PRICE_FIELDS: [&str; 5] = ["o", "h", "l", "c", "v"];
const TIME_FIELD: &str = "t";

/// One field-level validation failure in a provider payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub problem: String,
}

impl FieldIssue {
    fn new(field: &str, problem: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Tagged outcome of validating a candle payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CandlePayload {
    Ok(Dataset),
    NoData,
    Invalid(Vec<FieldIssue>),
}

impl CandlePayload {
    /// Maps the outcome to the crate error taxonomy.
    pub fn into_result(self, symbol: &str) -> ChartResult<Dataset> {
        match self {
            Self::Ok(dataset) => Ok(dataset),
            Self::NoData => Err(ChartError::NoData {
                symbol: symbol.to_owned(),
            }),
            Self::Invalid(issues) => Err(ChartError::Decode(
                issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            )),
        }
    }
}

/// Validates a raw `stock/candle` payload.
///
/// Accepts `{"s":"no_data"}` or `{"s":"ok"}` with equal-length numeric arrays
/// `o,h,l,c,v` and integer array `t` (unix seconds). Every failing field is
/// reported, not just the first. Unknown extra fields are ignored.
#[must_use]
pub fn decode_candle_payload(payload: &Value) -> CandlePayload {
    let Some(object) = payload.as_object() else {
        return CandlePayload::Invalid(vec![FieldIssue::new(
            "$",
            format!("expected an object, got {}", json_kind(payload)),
        )]);
    };

    let mut issues = Vec::new();
    match object.get("s") {
        Some(Value::String(status)) if status == STATUS_NO_DATA => return CandlePayload::NoData,
        Some(Value::String(status)) if status == STATUS_OK => {}
        Some(Value::String(status)) => issues.push(FieldIssue::new(
            "s",
            format!("expected \"{STATUS_OK}\" or \"{STATUS_NO_DATA}\", got \"{status}\""),
        )),
        Some(other) => issues.push(FieldIssue::new(
            "s",
            format!("expected a string, got {}", json_kind(other)),
        )),
        None => issues.push(FieldIssue::new("s", "missing")),
    }

    let timestamps = integer_array(object, TIME_FIELD, &mut issues);
    let columns: Vec<Option<Vec<f64>>> = PRICE_FIELDS
        .iter()
        .map(|field| number_array(object, field, &mut issues))
        .collect();

    if let Some(timestamps) = &timestamps {
        for (field, column) in PRICE_FIELDS.iter().zip(&columns) {
            if let Some(column) = column {
                if column.len() != timestamps.len() {
                    issues.push(FieldIssue::new(
                        field,
                        format!(
                            "length {} does not match `{TIME_FIELD}` length {}",
                            column.len(),
                            timestamps.len()
                        ),
                    ));
                }
            }
        }
    }

    if !issues.is_empty() {
        return CandlePayload::Invalid(issues);
    }

    let (Some(timestamps), [Some(open), Some(high), Some(low), Some(close), Some(volume)]) =
        (timestamps, columns.as_slice())
    else {
        return CandlePayload::Invalid(vec![FieldIssue::new("$", "incomplete candle arrays")]);
    };

    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, seconds) in timestamps.iter().enumerate() {
        let Some(date) = DateTime::from_timestamp(*seconds, 0) else {
            issues.push(FieldIssue::new(
                TIME_FIELD,
                format!("element {index} ({seconds}) is not a representable timestamp"),
            ));
            continue;
        };
        bars.push(PriceBar::new(
            date,
            open[index],
            high[index],
            low[index],
            close[index],
            volume[index],
        ));
    }
    if !issues.is_empty() {
        return CandlePayload::Invalid(issues);
    }

    match Dataset::new(bars) {
        Ok(dataset) => CandlePayload::Ok(dataset),
        Err(err) => CandlePayload::Invalid(vec![FieldIssue::new("$", err.to_string())]),
    }
}

/// Parses and validates a payload body.
#[must_use]
pub fn decode_candle_payload_str(body: &str) -> CandlePayload {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => decode_candle_payload(&value),
        Err(err) => CandlePayload::Invalid(vec![FieldIssue::new(
            "$",
            format!("body is not valid json: {err}"),
        )]),
    }
}

fn field_array<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<&'a Vec<Value>> {
    match object.get(field) {
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            issues.push(FieldIssue::new(
                field,
                format!("expected an array, got {}", json_kind(other)),
            ));
            None
        }
        None => {
            issues.push(FieldIssue::new(field, "missing"));
            None
        }
    }
}

fn number_array(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Vec<f64>> {
    let items = field_array(object, field, issues)?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_f64() {
            Some(value) => out.push(value),
            None => {
                issues.push(FieldIssue::new(
                    field,
                    format!("element {index} expected a number, got {}", json_kind(item)),
                ));
                return None;
            }
        }
    }
    Some(out)
}

fn integer_array(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Vec<i64>> {
    let items = field_array(object, field, issues)?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let integer = item.as_i64().or_else(|| {
            item.as_f64()
                .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                .map(|value| value as i64)
        });
        match integer {
            Some(value) => out.push(value),
            None => {
                issues.push(FieldIssue::new(
                    field,
                    format!(
                        "element {index} expected an integer, got {}",
                        json_kind(item)
                    ),
                ));
                return None;
            }
        }
    }
    Some(out)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
