use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{TollError, ValidationError},
    matrix::{location_id::LocationId, segment::Distance, unroll::UnrolledRow},
};

pub const DEFAULT_THRESHOLD_BAND: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Keeps every row of the origins whose mean distance is in the band.
    #[default]
    GroupMean,
    /// Keeps the rows whose own distance is in the band.
    RowDistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Relative half-width of the band around the reference average.
    pub band: f64,
    pub mode: ThresholdMode,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        ThresholdParams {
            band: DEFAULT_THRESHOLD_BAND,
            mode: ThresholdMode::default(),
        }
    }
}

impl ThresholdParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.band.is_finite() || !(0.0..1.0).contains(&self.band) {
            return Err(ValidationError::InvalidBand(self.band));
        }
        Ok(())
    }

    fn bounds(&self, reference_average: Distance) -> (Distance, Distance) {
        (
            (1.0 - self.band) * reference_average,
            (1.0 + self.band) * reference_average,
        )
    }
}

#[derive(Default, Clone, Copy)]
struct Accumulator {
    total: Distance,
    count: usize,
}

impl Accumulator {
    fn mean(&self) -> Distance {
        self.total / self.count as f64
    }
}

fn group_by_start(rows: &[UnrolledRow]) -> FxHashMap<LocationId, Accumulator> {
    let mut groups: FxHashMap<LocationId, Accumulator> = FxHashMap::default();
    for row in rows {
        let group = groups.entry(row.id_start).or_default();
        group.total += row.distance;
        group.count += 1;
    }
    groups
}

fn within((lower, upper): (Distance, Distance), distance: Distance) -> bool {
    lower <= distance && distance <= upper
}

/// Mean distance of the rows starting at `reference_id`.
pub fn reference_average(
    rows: &[UnrolledRow],
    reference_id: LocationId,
) -> Result<Distance, TollError> {
    let group = rows
        .iter()
        .filter(|row| row.id_start == reference_id)
        .fold(Accumulator::default(), |mut acc, row| {
            acc.total += row.distance;
            acc.count += 1;
            acc
        });

    if group.count == 0 {
        return Err(TollError::NotFound(reference_id));
    }

    Ok(group.mean())
}

/// Returns the rows lying within the band around the reference id's average
/// distance, in their original order.
pub fn filter_within_threshold(
    rows: &[UnrolledRow],
    reference_id: LocationId,
    params: &ThresholdParams,
) -> Result<Vec<UnrolledRow>, TollError> {
    params.validate()?;

    let filtered = match params.mode {
        ThresholdMode::GroupMean => {
            let groups = group_by_start(rows);
            let reference = groups
                .get(&reference_id)
                .ok_or(TollError::NotFound(reference_id))?;
            let bounds = params.bounds(reference.mean());
            debug!("Threshold band for {reference_id}: {bounds:?}");

            rows.iter()
                .filter(|row| within(bounds, groups[&row.id_start].mean()))
                .copied()
                .collect()
        }
        ThresholdMode::RowDistance => {
            let bounds = params.bounds(reference_average(rows, reference_id)?);
            debug!("Threshold band for {reference_id}: {bounds:?}");

            rows.iter()
                .filter(|row| within(bounds, row.distance))
                .copied()
                .collect()
        }
    };

    Ok(filtered)
}

/// Sorted origins present in a filtered table.
pub fn matching_ids(rows: &[UnrolledRow]) -> Vec<LocationId> {
    let mut ids = rows.iter().map(|row| row.id_start).collect::<Vec<_>>();
    ids.sort_unstable();
    ids.dedup();
    ids
}
