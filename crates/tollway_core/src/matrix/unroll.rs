use serde::{Deserialize, Serialize};

use crate::matrix::{
    distance_matrix::{DistanceMatrix, LocationIdx},
    location_id::LocationId,
    segment::Distance,
};

/// One origin-destination pair of an unrolled distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnrolledRow {
    pub id_start: LocationId,
    pub id_end: LocationId,
    pub distance: Distance,
}

impl UnrolledRow {
    pub fn new(id_start: i64, id_end: i64, distance: Distance) -> Self {
        UnrolledRow {
            id_start: LocationId::new(id_start),
            id_end: LocationId::new(id_end),
            distance,
        }
    }
}

/// Flattens the matrix into one row per ordered pair of distinct locations.
///
/// Rows follow the matrix order: every destination of the first origin, then
/// every destination of the second origin, and so on. Zero distances are kept,
/// the diagonal is not.
pub fn unroll(matrix: &DistanceMatrix) -> Vec<UnrolledRow> {
    let num_locations = matrix.num_locations();
    let mut rows = Vec::with_capacity(num_locations * num_locations.saturating_sub(1));

    for from in LocationIdx::all(num_locations) {
        for to in LocationIdx::all(num_locations) {
            if from == to {
                continue;
            }

            rows.push(UnrolledRow {
                id_start: matrix.id(from),
                id_end: matrix.id(to),
                distance: matrix.distance_at(from, to),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use crate::matrix::segment::SegmentRecord;

    use super::*;

    #[test]
    fn test_single_segment() {
        let matrix = DistanceMatrix::from_segments(&[SegmentRecord::new(1, 2, 5.0)]).unwrap();

        assert_eq!(
            unroll(&matrix),
            vec![UnrolledRow::new(1, 2, 5.0), UnrolledRow::new(2, 1, 5.0)]
        );
    }

    #[test]
    fn test_row_major_order() {
        let matrix = DistanceMatrix::from_segments(&[
            SegmentRecord::new(3, 1, 7.0),
            SegmentRecord::new(1, 2, 2.0),
        ])
        .unwrap();

        let pairs = unroll(&matrix)
            .iter()
            .map(|row| (row.id_start.value(), row.id_end.value(), row.distance))
            .collect::<Vec<_>>();

        assert_eq!(
            pairs,
            vec![
                (1, 2, 2.0),
                (1, 3, 7.0),
                (2, 1, 2.0),
                (2, 3, 0.0),
                (3, 1, 7.0),
                (3, 2, 0.0),
            ]
        );
    }

    #[test]
    fn test_row_count_and_no_self_pairs() {
        let records = (0..6)
            .map(|i| SegmentRecord::new(i, i + 1, i as f64 + 1.0))
            .collect::<Vec<_>>();
        let matrix = DistanceMatrix::from_segments(&records).unwrap();
        let rows = unroll(&matrix);

        assert_eq!(rows.len(), 7 * 6);
        assert!(rows.iter().all(|row| row.id_start != row.id_end));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = DistanceMatrix::from_segments(&[]).unwrap();
        assert!(unroll(&matrix).is_empty());
    }
}
