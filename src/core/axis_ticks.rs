use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;

/// Tick count both axes aim for.
pub const DEFAULT_TICK_COUNT: usize = 10;

const SECOND: f64 = 1.0;
const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const WEEK: f64 = 604_800.0;
const MONTH: f64 = 2_592_000.0;
const YEAR: f64 = 31_536_000.0;

/// One labelled axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Domain value: price, or unix seconds for the time axis.
    pub value: f64,
    /// Pixel offset along the axis.
    pub position: f64,
    pub label: String,
}

/// Calendar cadence chosen for time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeTickInterval {
    Seconds(u32),
    Minutes(u32),
    Hours(u32),
    Days(u32),
    Weeks,
    Months(u32),
    Years(u32),
}

impl TimeTickInterval {
    const LADDER: [(Self, f64); 18] = [
        (Self::Seconds(1), SECOND),
        (Self::Seconds(5), 5.0 * SECOND),
        (Self::Seconds(15), 15.0 * SECOND),
        (Self::Seconds(30), 30.0 * SECOND),
        (Self::Minutes(1), MINUTE),
        (Self::Minutes(5), 5.0 * MINUTE),
        (Self::Minutes(15), 15.0 * MINUTE),
        (Self::Minutes(30), 30.0 * MINUTE),
        (Self::Hours(1), HOUR),
        (Self::Hours(3), 3.0 * HOUR),
        (Self::Hours(6), 6.0 * HOUR),
        (Self::Hours(12), 12.0 * HOUR),
        (Self::Days(1), DAY),
        (Self::Days(2), 2.0 * DAY),
        (Self::Weeks, WEEK),
        (Self::Months(1), MONTH),
        (Self::Months(3), 3.0 * MONTH),
        (Self::Years(1), YEAR),
    ];

    /// Picks the interval whose nominal duration is closest (by ratio) to
    /// `span / count`.
    #[must_use]
    pub fn for_span(span_seconds: f64, count: usize) -> Self {
        let target = span_seconds.abs() / count.max(1) as f64;
        let upper = Self::LADDER.partition_point(|(_, duration)| *duration <= target);
        if upper == 0 {
            return Self::Seconds(1);
        }
        if upper == Self::LADDER.len() {
            let years = tick_step(0.0, span_seconds.abs() / YEAR, count).max(1.0);
            return Self::Years(years as u32);
        }

        let (lower_interval, lower_duration) = Self::LADDER[upper - 1];
        let (upper_interval, upper_duration) = Self::LADDER[upper];
        if target / lower_duration < upper_duration / target {
            lower_interval
        } else {
            upper_interval
        }
    }

    fn contains(self, date: DateTime<Utc>) -> bool {
        let step = self.step();
        let aligned_clock = date.nanosecond() == 0;
        let midnight = aligned_clock && date.num_seconds_from_midnight() == 0;
        match self {
            Self::Seconds(_) => aligned_clock && date.second() % step == 0,
            Self::Minutes(_) => aligned_clock && date.second() == 0 && date.minute() % step == 0,
            Self::Hours(_) => {
                aligned_clock && date.second() == 0 && date.minute() == 0 && date.hour() % step == 0
            }
            Self::Days(_) => midnight && (date.day() - 1) % step == 0,
            Self::Weeks => midnight && date.weekday() == Weekday::Sun,
            Self::Months(_) => midnight && date.day() == 1 && date.month0() % step == 0,
            Self::Years(_) => {
                midnight && date.ordinal() == 1 && date.year().rem_euclid(step as i32) == 0
            }
        }
    }

    fn step(self) -> u32 {
        match self {
            Self::Seconds(step)
            | Self::Minutes(step)
            | Self::Hours(step)
            | Self::Days(step)
            | Self::Months(step)
            | Self::Years(step) => step.max(1),
            Self::Weeks => 1,
        }
    }

    /// Finest unit the interval moves in; candidates are walked in this step.
    fn walk_unit(self) -> Duration {
        match self {
            Self::Seconds(_) => Duration::seconds(1),
            Self::Minutes(_) => Duration::minutes(1),
            Self::Hours(_) => Duration::hours(1),
            Self::Days(_) | Self::Weeks | Self::Months(_) | Self::Years(_) => Duration::days(1),
        }
    }

    fn floor(self, date: DateTime<Utc>) -> DateTime<Utc> {
        let day_start = NaiveDate::from_ymd_opt(date.year(), date.month(), date.day())
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or(date);
        match self {
            Self::Seconds(_) => {
                day_start + Duration::seconds(i64::from(date.num_seconds_from_midnight()))
            }
            Self::Minutes(_) => {
                day_start + Duration::minutes(i64::from(date.num_seconds_from_midnight() / 60))
            }
            Self::Hours(_) => day_start + Duration::hours(i64::from(date.hour())),
            Self::Days(_) | Self::Weeks | Self::Months(_) | Self::Years(_) => day_start,
        }
    }
}

/// Tick increment: a 1, 2 or 5 multiple of a power of ten.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Round-number values covering `[start, stop]`, about `count` of them.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = (start.min(stop), start.max(stop));
    let step = tick_step(lo, hi, count);
    if step <= 0.0 {
        return Vec::new();
    }

    // Work in integer multiples so decimal steps do not drift.
    if step < 1.0 {
        let inverse = (1.0 / step).round();
        let mut first = (lo * inverse).round() as i64;
        let mut last = (hi * inverse).round() as i64;
        if (first as f64) / inverse < lo {
            first += 1;
        }
        if (last as f64) / inverse > hi {
            last -= 1;
        }
        (first..=last).map(|i| i as f64 / inverse).collect()
    } else {
        let mut first = (lo / step).round() as i64;
        let mut last = (hi / step).round() as i64;
        if (first as f64) * step < lo {
            first += 1;
        }
        if (last as f64) * step > hi {
            last -= 1;
        }
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Price axis ticks, labelled with the decimals implied by the tick step.
#[must_use]
pub fn price_axis_ticks(scale: PriceScale, count: usize) -> Vec<AxisTick> {
    let (start, stop) = scale.domain();
    let step = tick_step(start, stop, count);
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    nice_ticks(start, stop, count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: scale.price_to_pixel(value),
            label: format!("{value:.decimals$}"),
        })
        .collect()
}

/// Calendar-aligned time axis ticks with per-tick labels.
pub fn time_axis_ticks(scale: TimeScale, count: usize) -> ChartResult<Vec<AxisTick>> {
    let (start, stop) = scale.domain();
    if start == stop {
        let date = unix_seconds_to_datetime(start)?;
        return Ok(vec![AxisTick {
            value: start,
            position: scale.time_to_pixel(start),
            label: format_time_tick(date),
        }]);
    }

    let interval = TimeTickInterval::for_span(stop - start, count);
    let start_date = unix_seconds_to_datetime(start)?;
    let stop_date = unix_seconds_to_datetime(stop)?;

    let mut ticks = Vec::new();
    let mut cursor = interval.floor(start_date);
    if cursor < start_date {
        cursor += interval.walk_unit();
    }
    while cursor <= stop_date {
        if interval.contains(cursor) {
            let value = datetime_to_unix_seconds(cursor);
            ticks.push(AxisTick {
                value,
                position: scale.time_to_pixel(value),
                label: format_time_tick(cursor),
            });
        }
        cursor += interval.walk_unit();
    }
    Ok(ticks)
}

/// Labels a tick by the coarsest calendar boundary it sits on.
#[must_use]
pub fn format_time_tick(date: DateTime<Utc>) -> String {
    let pattern = if date.second() != 0 {
        ":%S"
    } else if date.minute() != 0 {
        "%I:%M"
    } else if date.hour() != 0 {
        "%I %p"
    } else if date.day() != 1 {
        if date.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if date.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    date.format(pattern).to_string()
}
