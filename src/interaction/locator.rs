use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PriceBar, TimeScale};
use crate::error::{ChartError, ChartResult};

/// Bar nearest in time to a pointer position, with its dataset index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestBar {
    pub index: usize,
    pub bar: PriceBar,
}

/// Finds the bar closest in time to `pointer_x`.
///
/// The pointer is inverted through the time scale, then the date-ordered bars
/// are bisected for the left insertion point (never below 1). The earlier
/// neighbour wins ties; the later one is chosen only when strictly closer.
/// Pointers before the first or after the last bar resolve to that bar.
pub fn locate_nearest(
    pointer_x: f64,
    time_scale: TimeScale,
    bars: &[PriceBar],
) -> ChartResult<NearestBar> {
    if bars.is_empty() {
        return Err(ChartError::DataRange(
            "cannot locate a bar in an empty dataset".to_owned(),
        ));
    }
    let candidate = time_scale.pixel_to_time(pointer_x)?;

    let insertion = bars.partition_point(|bar| bar.time() < candidate).max(1);
    let lower = insertion - 1;

    // Signed gaps: a pointer before the first bar gives the lower side a
    // negative gap, which keeps it selected.
    let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 2]> = SmallVec::new();
    candidates.push((OrderedFloat(candidate - bars[lower].time()), lower));
    if let Some(upper) = bars.get(insertion) {
        candidates.push((OrderedFloat(upper.time() - candidate), insertion));
    }

    let index = candidates
        .into_iter()
        .min_by_key(|(gap, _)| *gap)
        .map_or(lower, |(_, index)| index);

    Ok(NearestBar {
        index,
        bar: bars[index],
    })
}
