use std::sync::Arc;

use jiff::civil::{Time, Weekday};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::TollError,
    matrix::{location_id::LocationId, segment::Distance},
    pricing::{
        schedule::TollSchedule,
        toll_rate::TollRow,
        vehicle::VehicleTolls,
        weekday::{WEEK, serde_weekday},
    },
};

/// Day and time span a toll row applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelWindow {
    #[serde(with = "serde_weekday")]
    pub start_day: Weekday,
    pub start_time: Time,
    #[serde(with = "serde_weekday")]
    pub end_day: Weekday,
    pub end_time: Time,
}

impl TravelWindow {
    pub fn same_day(day: Weekday, start_time: Time, end_time: Time) -> Self {
        TravelWindow {
            start_day: day,
            start_time,
            end_day: day,
            end_time,
        }
    }

    /// Starts and ends on the same day without wrapping past midnight.
    pub fn is_single_day(&self) -> bool {
        self.start_day == self.end_day && self.start_time <= self.end_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowedTollRow {
    pub row: TollRow,
    pub window: TravelWindow,
}

/// Outcome of looking up the bracket of a travel window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BracketMatch {
    Matched { bracket: Arc<str>, factor: f64 },
    /// The window spans a bracket boundary, crosses midnight or covers more
    /// than one day. Distance and tolls are left as is.
    Unmatched,
}

impl BracketMatch {
    pub fn factor(&self) -> Option<f64> {
        match self {
            BracketMatch::Matched { factor, .. } => Some(*factor),
            BracketMatch::Unmatched => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAdjustedTollRow {
    pub id_start: LocationId,
    pub id_end: LocationId,
    pub distance: Distance,
    pub tolls: VehicleTolls,
    pub window: TravelWindow,
    pub bracket: BracketMatch,
}

impl TimeAdjustedTollRow {
    fn from_windowed(windowed: &WindowedTollRow, schedule: &TollSchedule) -> Self {
        let WindowedTollRow { row, window } = *windowed;

        let bracket = window
            .is_single_day()
            .then(|| schedule.find_bracket(window.start_time, window.end_time))
            .flatten();

        let Some(bracket) = bracket else {
            return TimeAdjustedTollRow {
                id_start: row.id_start,
                id_end: row.id_end,
                distance: row.distance,
                tolls: row.tolls,
                window,
                bracket: BracketMatch::Unmatched,
            };
        };

        let factor = bracket.factor(window.start_day);
        let distance = row.distance * factor;

        TimeAdjustedTollRow {
            id_start: row.id_start,
            id_end: row.id_end,
            distance,
            tolls: VehicleTolls::from_distance(distance, &schedule.vehicle_rates),
            window,
            bracket: BracketMatch::Matched {
                bracket: Arc::clone(&bracket.name),
                factor,
            },
        }
    }
}

/// Pairs each row with one same-day window per weekday and bracket.
pub fn weekly_windows(rows: &[TollRow], schedule: &TollSchedule) -> Vec<WindowedTollRow> {
    rows.iter()
        .flat_map(|row| {
            WEEK.into_iter().flat_map(move |day| {
                schedule.brackets.iter().map(move |bracket| WindowedTollRow {
                    row: *row,
                    window: TravelWindow::same_day(day, bracket.start, bracket.end),
                })
            })
        })
        .collect()
}

/// Scales the distance of every row by the factor of the bracket its window
/// falls in, then recomputes the vehicle tolls from the scaled distance.
///
/// Windows that fall in no bracket keep their values and are reported as
/// [`BracketMatch::Unmatched`]. Only single-day windows can match: a window
/// ending on another day, or before it starts, is always unmatched.
pub fn calculate_time_based_toll_rates(
    rows: &[WindowedTollRow],
    schedule: &TollSchedule,
) -> Result<Vec<TimeAdjustedTollRow>, TollError> {
    schedule.validate()?;

    let adjusted: Vec<TimeAdjustedTollRow> = rows
        .par_iter()
        .map(|row| TimeAdjustedTollRow::from_windowed(row, schedule))
        .collect();

    let unmatched = adjusted
        .iter()
        .filter(|row| row.bracket == BracketMatch::Unmatched)
        .count();
    if unmatched > 0 {
        warn!("{unmatched} rows match no single bracket and were not adjusted");
    }

    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use jiff::civil::time;

    use crate::{matrix::unroll::UnrolledRow, pricing::vehicle::VehicleRates};

    use super::*;

    fn toll_row(distance: f64) -> TollRow {
        TollRow::from_unrolled(&UnrolledRow::new(1, 2, distance), &VehicleRates::default())
    }

    fn adjust(distance: f64, window: TravelWindow) -> TimeAdjustedTollRow {
        let rows = vec![WindowedTollRow {
            row: toll_row(distance),
            window,
        }];

        calculate_time_based_toll_rates(&rows, &TollSchedule::default())
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_weekday_morning() {
        let row = adjust(
            10.0,
            TravelWindow::same_day(Weekday::Monday, time(9, 0, 0, 0), time(9, 30, 0, 0)),
        );

        assert_eq!(row.distance, 10.0 * 0.8);
        assert_relative_eq!(row.tolls.car, 10.0 * 0.8 * 1.2);
        assert_eq!(
            row.bracket,
            BracketMatch::Matched {
                bracket: Arc::from("morning"),
                factor: 0.8
            }
        );
    }

    #[test]
    fn test_weekend_morning() {
        let row = adjust(
            10.0,
            TravelWindow::same_day(Weekday::Saturday, time(9, 0, 0, 0), time(9, 30, 0, 0)),
        );

        assert_eq!(row.distance, 10.0 * 0.7);
        assert_eq!(row.bracket.factor(), Some(0.7));
    }

    #[test]
    fn test_weekday_day_bracket() {
        let row = adjust(
            5.0,
            TravelWindow::same_day(Weekday::Wednesday, time(12, 0, 0, 0), time(13, 0, 0, 0)),
        );

        assert_relative_eq!(row.distance, 6.0);
        assert_relative_eq!(row.tolls.truck, 6.0 * 3.6);
    }

    #[test]
    fn test_boundary_span_is_unmatched() {
        let original = toll_row(10.0);
        let row = adjust(
            10.0,
            TravelWindow::same_day(Weekday::Tuesday, time(9, 30, 0, 0), time(10, 30, 0, 0)),
        );

        assert_eq!(row.bracket, BracketMatch::Unmatched);
        assert_eq!(row.distance, 10.0);
        assert_eq!(row.tolls, original.tolls);
    }

    #[test]
    fn test_weekend_evening() {
        let row = adjust(
            10.0,
            TravelWindow::same_day(Weekday::Sunday, time(19, 0, 0, 0), time(20, 0, 0, 0)),
        );

        assert_eq!(row.bracket.factor(), Some(0.7));
        assert_relative_eq!(row.distance, 7.0);
    }

    #[test]
    fn test_window_past_midnight_is_unmatched() {
        let original = toll_row(10.0);
        let row = adjust(
            10.0,
            TravelWindow::same_day(Weekday::Monday, time(23, 0, 0, 0), time(1, 0, 0, 0)),
        );

        assert_eq!(row.bracket, BracketMatch::Unmatched);
        assert_eq!(row.distance, 10.0);
        assert_eq!(row.tolls, original.tolls);
    }

    #[test]
    fn test_multi_day_window_is_unmatched() {
        let spans = [
            (Weekday::Monday, time(9, 0, 0, 0), Weekday::Thursday, time(9, 30, 0, 0)),
            (Weekday::Sunday, time(19, 0, 0, 0), Weekday::Monday, time(20, 0, 0, 0)),
            (Weekday::Friday, time(23, 0, 0, 0), Weekday::Saturday, time(1, 0, 0, 0)),
        ];

        for (start_day, start_time, end_day, end_time) in spans {
            let window = TravelWindow {
                start_day,
                start_time,
                end_day,
                end_time,
            };
            assert!(!window.is_single_day());

            let row = adjust(10.0, window);
            assert_eq!(row.bracket, BracketMatch::Unmatched);
            assert_eq!(row.distance, 10.0);
        }
    }

    #[test]
    fn test_matched_rows_share_bracket_name() {
        let schedule = TollSchedule::default();
        let rows = weekly_windows(&[toll_row(1.0), toll_row(2.0)], &schedule);
        let adjusted = calculate_time_based_toll_rates(&rows, &schedule).unwrap();

        for row in &adjusted {
            let BracketMatch::Matched { bracket, .. } = &row.bracket else {
                panic!("weekly windows always match their own bracket");
            };
            assert!(
                schedule
                    .brackets
                    .iter()
                    .any(|b| Arc::ptr_eq(&b.name, bracket))
            );
        }
    }

    #[test]
    fn test_weekly_windows() {
        let schedule = TollSchedule::default();
        let rows = weekly_windows(&[toll_row(1.0), toll_row(2.0)], &schedule);

        assert_eq!(rows.len(), 2 * 7 * 3);
        assert_eq!(
            rows[0].window,
            TravelWindow::same_day(Weekday::Monday, time(0, 0, 0, 0), time(10, 0, 0, 0))
        );
        assert_eq!(
            rows[20].window,
            TravelWindow::same_day(Weekday::Sunday, time(18, 0, 0, 0), time(23, 59, 59, 0))
        );
        assert_eq!(rows[21].row.distance, 2.0);

        let adjusted = calculate_time_based_toll_rates(&rows, &schedule).unwrap();
        assert!(
            adjusted
                .iter()
                .all(|row| matches!(row.bracket, BracketMatch::Matched { .. }))
        );
    }

    #[test]
    fn test_window_serialization() {
        let window =
            TravelWindow::same_day(Weekday::Friday, time(10, 0, 0, 0), time(18, 0, 0, 0));
        let json = serde_json::to_value(window).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "start_day": "Friday",
                "start_time": "10:00:00",
                "end_day": "Friday",
                "end_time": "18:00:00",
            })
        );

        let parsed: TravelWindow = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, window);
    }
}
