use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::TollError,
    matrix::{location_id::LocationId, segment::Distance, unroll::UnrolledRow},
    pricing::vehicle::{VehicleRates, VehicleTolls},
};

/// A segment row annotated with the toll of each vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TollRow {
    pub id_start: LocationId,
    pub id_end: LocationId,
    pub distance: Distance,
    pub tolls: VehicleTolls,
}

impl TollRow {
    pub fn from_unrolled(row: &UnrolledRow, rates: &VehicleRates) -> Self {
        TollRow {
            id_start: row.id_start,
            id_end: row.id_end,
            distance: row.distance,
            tolls: VehicleTolls::from_distance(row.distance, rates),
        }
    }
}

/// Sets the toll of every vehicle type to `distance * coefficient`, keeping row order.
pub fn calculate_toll_rates(
    rows: &[UnrolledRow],
    rates: &VehicleRates,
) -> Result<Vec<TollRow>, TollError> {
    rates.validate()?;

    Ok(rows
        .par_iter()
        .map(|row| TollRow::from_unrolled(row, rates))
        .collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::error::ValidationError;

    use super::*;

    #[test]
    fn test_car_toll() {
        let rows = calculate_toll_rates(&[UnrolledRow::new(1, 2, 10.0)], &VehicleRates::default())
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_relative_eq!(rows[0].tolls.car, 12.0);
        assert_relative_eq!(rows[0].distance, 10.0);
    }

    #[test]
    fn test_order_is_preserved() {
        let input = (0..100)
            .map(|i| UnrolledRow::new(i, i + 1, i as f64))
            .collect::<Vec<_>>();

        let rows = calculate_toll_rates(&input, &VehicleRates::default()).unwrap();

        for (toll_row, row) in rows.iter().zip(&input) {
            assert_eq!(toll_row.id_start, row.id_start);
            assert_eq!(toll_row.id_end, row.id_end);
        }
    }

    #[test]
    fn test_tolls_increase_with_distance() {
        let input = vec![UnrolledRow::new(1, 2, 3.0), UnrolledRow::new(1, 3, 4.5)];
        let rows = calculate_toll_rates(&input, &VehicleRates::default()).unwrap();

        for (vehicle, toll) in rows[0].tolls.iter() {
            assert!(toll < rows[1].tolls.get(vehicle));
        }
    }

    #[test]
    fn test_invalid_rates() {
        let rates = VehicleRates {
            truck: -3.6,
            ..VehicleRates::default()
        };

        assert_eq!(
            calculate_toll_rates(&[UnrolledRow::new(1, 2, 1.0)], &rates),
            Err(TollError::Validation(ValidationError::InvalidCoefficient {
                vehicle: String::from("truck"),
                coefficient: -3.6,
            }))
        );
    }
}
