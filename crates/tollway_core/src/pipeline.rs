use tracing::info;

use crate::{
    error::TollError,
    matrix::{
        distance_matrix::DistanceMatrix,
        location_id::LocationId,
        segment::SegmentRecord,
        threshold::{ThresholdParams, filter_within_threshold},
        unroll::{UnrolledRow, unroll},
    },
    pricing::{
        schedule::TollSchedule,
        time_based::{TimeAdjustedTollRow, calculate_time_based_toll_rates, weekly_windows},
        toll_rate::{TollRow, calculate_toll_rates},
    },
    utils::time::timed_stage,
};

/// Every table produced by a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub matrix: DistanceMatrix,
    pub unrolled: Vec<UnrolledRow>,
    pub filtered: Vec<UnrolledRow>,
    pub tolls: Vec<TollRow>,
}

pub struct TollPipeline {
    schedule: TollSchedule,
    threshold: ThresholdParams,
}

impl TollPipeline {
    pub fn new(schedule: TollSchedule, threshold: ThresholdParams) -> Result<Self, TollError> {
        schedule.validate()?;
        threshold.validate()?;

        Ok(TollPipeline {
            schedule,
            threshold,
        })
    }

    pub fn schedule(&self) -> &TollSchedule {
        &self.schedule
    }

    /// Builds the matrix and returns its unrolled table.
    pub fn unrolled(
        &self,
        records: &[SegmentRecord],
    ) -> Result<(DistanceMatrix, Vec<UnrolledRow>), TollError> {
        let matrix = timed_stage!(
            "build matrix",
            DistanceMatrix::from_segments(records)?
        );
        info!(
            "Distance matrix has {} locations from {} segments",
            matrix.num_locations(),
            records.len()
        );

        let unrolled = timed_stage!("unroll", unroll(&matrix));
        info!("Unrolled {} origin-destination pairs", unrolled.len());

        Ok((matrix, unrolled))
    }

    /// Runs every stage up to the distance-based tolls. Without a reference id
    /// the threshold filter is skipped and tolls are computed for the whole
    /// unrolled table. Time brackets are applied by [`TollPipeline::time_based`].
    pub fn run(
        &self,
        records: &[SegmentRecord],
        reference_id: Option<LocationId>,
    ) -> Result<PipelineOutput, TollError> {
        let (matrix, unrolled) = self.unrolled(records)?;

        let filtered = match reference_id {
            Some(reference_id) => {
                let filtered = timed_stage!(
                    "threshold filter",
                    filter_within_threshold(&unrolled, reference_id, &self.threshold)?
                );
                info!(
                    "{} of {} pairs are within {:.0}% of {}",
                    filtered.len(),
                    unrolled.len(),
                    self.threshold.band * 100.0,
                    reference_id
                );
                filtered
            }
            None => unrolled.clone(),
        };

        let tolls = timed_stage!(
            "toll rates",
            calculate_toll_rates(&filtered, &self.schedule.vehicle_rates)?
        );
        info!("Computed {} toll rows", tolls.len());

        Ok(PipelineOutput {
            matrix,
            unrolled,
            filtered,
            tolls,
        })
    }

    /// Expands `tolls` over every weekday and bracket of the schedule and
    /// applies the bracket factors. The result has `7 * brackets` rows per
    /// toll row, so callers only pay for it when they ask.
    pub fn time_based(&self, tolls: &[TollRow]) -> Result<Vec<TimeAdjustedTollRow>, TollError> {
        let windowed = weekly_windows(tolls, &self.schedule);
        let time_adjusted = timed_stage!(
            "time based toll rates",
            calculate_time_based_toll_rates(&windowed, &self.schedule)?
        );
        info!("Computed {} time based toll rows", time_adjusted.len());

        Ok(time_adjusted)
    }
}

impl Default for TollPipeline {
    fn default() -> Self {
        TollPipeline {
            schedule: TollSchedule::default(),
            threshold: ThresholdParams::default(),
        }
    }
}
