use std::collections::BTreeSet;

use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    error::TollError,
    matrix::{
        location_id::LocationId,
        segment::{Distance, SegmentRecord},
    },
    utils::position::position_newtype,
};

position_newtype!(
    /// Position of a location in the matrix order.
    LocationIdx => LocationId
);

/// Symmetric all-pairs distance matrix.
///
/// Distances are stored in a flat row-major vector. The position of a pair is
/// `from * num_locations + to`, where positions follow the ascending order of
/// the location ids.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    ids: Vec<LocationId>,
    positions: FxHashMap<LocationId, LocationIdx>,
    distances: Vec<Distance>,
    num_locations: usize,
}

fn is_flat_matrix_symmetric(matrix: &[Distance], num_locations: usize) -> bool {
    for i in 0..num_locations {
        for j in (i + 1)..num_locations {
            if matrix[i * num_locations + j] != matrix[j * num_locations + i] {
                return false;
            }
        }
    }
    true
}

/// Turns per-direction sums into `observed(a, b) + observed(b, a)` on both
/// sides of the diagonal. Each direction is fully summed first, so both cells
/// hold the same value whatever the record order.
fn reflect_directed_sums(matrix: &mut [Distance], num_locations: usize) {
    for i in 0..num_locations {
        for j in (i + 1)..num_locations {
            let total = matrix[i * num_locations + j] + matrix[j * num_locations + i];
            matrix[i * num_locations + j] = total;
            matrix[j * num_locations + i] = total;
        }
    }
}

impl DistanceMatrix {
    /// Builds the matrix from directed segments.
    ///
    /// Repeated pairs are summed and every segment is reflected across the
    /// diagonal, so `M[a][b] = M[b][a] = observed(a, b) + observed(b, a)`.
    /// Pairs that were never observed stay at zero, as does the diagonal.
    pub fn from_segments(records: &[SegmentRecord]) -> Result<Self, TollError> {
        for record in records {
            record.validate()?;
        }

        let ids: Vec<LocationId> = records
            .iter()
            .flat_map(|record| [record.id_start, record.id_end])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let positions: FxHashMap<LocationId, LocationIdx> = ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, LocationIdx::new(index)))
            .collect();

        let num_locations = ids.len();
        let mut distances = vec![0.0; num_locations * num_locations];
        let mut self_loops = 0;

        for record in records {
            if record.is_self_loop() {
                self_loops += 1;
                continue;
            }

            let from = positions[&record.id_start].get();
            let to = positions[&record.id_end].get();

            distances[from * num_locations + to] += record.distance;
        }

        reflect_directed_sums(&mut distances, num_locations);

        if self_loops > 0 {
            debug!("Ignored {self_loops} self-referencing segments");
        }

        debug_assert!(is_flat_matrix_symmetric(&distances, num_locations));

        Ok(DistanceMatrix {
            ids,
            positions,
            distances,
            num_locations,
        })
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn is_empty(&self) -> bool {
        self.num_locations == 0
    }

    /// Location ids in matrix order.
    pub fn ids(&self) -> &[LocationId] {
        &self.ids
    }

    pub fn id(&self, index: LocationIdx) -> LocationId {
        self.ids.as_slice()[index]
    }

    pub fn index_of(&self, id: LocationId) -> Option<LocationIdx> {
        self.positions.get(&id).copied()
    }

    #[inline(always)]
    pub fn distance_at(&self, from: LocationIdx, to: LocationIdx) -> Distance {
        self.distances[self.index(from, to)]
    }

    /// Distance between two ids, or `None` if either id is not part of the matrix.
    pub fn distance(&self, from: LocationId, to: LocationId) -> Option<Distance> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;

        Some(self.distance_at(from, to))
    }

    pub fn row(&self, id: LocationId) -> Option<&[Distance]> {
        let start = self.index_of(id)?.get() * self.num_locations;
        Some(&self.distances[start..start + self.num_locations])
    }

    pub fn is_symmetric(&self) -> bool {
        is_flat_matrix_symmetric(&self.distances, self.num_locations)
    }
}
