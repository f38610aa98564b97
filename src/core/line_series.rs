use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{ChartScales, MovingAveragePoint, PriceBar};

/// Number of straight pieces used to flatten one smoothed curve span.
pub const BASIS_SAMPLES_PER_SPAN: usize = 8;

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects bar closes into plot-space points.
#[must_use]
pub fn project_close_points(bars: &[PriceBar], scales: &ChartScales) -> Vec<(f64, f64)> {
    #[cfg(feature = "parallel-projection")]
    {
        bars.par_iter().map(|bar| scales.project_close(bar)).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        bars.iter().map(|bar| scales.project_close(bar)).collect()
    }
}

/// Projects moving-average points into plot-space points.
#[must_use]
pub fn project_average_points(
    points: &[MovingAveragePoint],
    scales: &ChartScales,
) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|point| {
            (
                scales.time.date_to_pixel(point.date),
                scales.price.price_to_pixel(point.average),
            )
        })
        .collect()
}

/// Joins adjacent points into segments. Fewer than two points give no segments.
#[must_use]
pub fn segments_from_points(points: &[(f64, f64)]) -> Vec<LineSegment> {
    points
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect()
}

/// Smooths a polyline with a uniform cubic B-spline and flattens it again.
///
/// The curve starts and ends on the first and last input points and passes
/// near, not through, the interior ones. Two points stay a straight line.
#[must_use]
pub fn smooth_basis(points: &[(f64, f64)], samples_per_span: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let samples = samples_per_span.max(1);

    let mut out = Vec::with_capacity(2 + (points.len() - 1) * samples);
    let first = points[0];
    let second = points[1];
    out.push(first);
    let mut cursor = ((5.0 * first.0 + second.0) / 6.0, (5.0 * first.1 + second.1) / 6.0);
    out.push(cursor);

    let mut p0 = first;
    let mut p1 = second;
    for &next in &points[2..] {
        cursor = push_basis_span(&mut out, cursor, p0, p1, next, samples);
        p0 = p1;
        p1 = next;
    }
    // Closing span reuses the last point as its own successor.
    push_basis_span(&mut out, cursor, p0, p1, p1, samples);
    out.push(p1);
    out
}

fn push_basis_span(
    out: &mut Vec<(f64, f64)>,
    start: (f64, f64),
    p0: (f64, f64),
    p1: (f64, f64),
    next: (f64, f64),
    samples: usize,
) -> (f64, f64) {
    let c1 = ((2.0 * p0.0 + p1.0) / 3.0, (2.0 * p0.1 + p1.1) / 3.0);
    let c2 = ((p0.0 + 2.0 * p1.0) / 3.0, (p0.1 + 2.0 * p1.1) / 3.0);
    let end = (
        (p0.0 + 4.0 * p1.0 + next.0) / 6.0,
        (p0.1 + 4.0 * p1.1 + next.1) / 6.0,
    );

    for step in 1..samples {
        let t = step as f64 / samples as f64;
        out.push(cubic_bezier(start, c1, c2, end, t));
    }
    out.push(end);
    end
}

fn cubic_bezier(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}
