use serde::{Deserialize, Serialize};

use crate::{
    error::{TollError, ValidationError},
    matrix::location_id::LocationId,
};

pub type Distance = f64;

/// A measured directed distance between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id_start: LocationId,
    pub id_end: LocationId,
    pub distance: Distance,
}

impl SegmentRecord {
    pub fn new(id_start: i64, id_end: i64, distance: Distance) -> Self {
        SegmentRecord {
            id_start: LocationId::new(id_start),
            id_end: LocationId::new(id_end),
            distance,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.id_start == self.id_end
    }

    pub fn validate(&self) -> Result<(), TollError> {
        if !self.distance.is_finite() {
            return Err(ValidationError::NonFiniteDistance {
                id_start: self.id_start,
                id_end: self.id_end,
            }
            .into());
        }

        if self.distance < 0.0 {
            return Err(ValidationError::NegativeDistance {
                id_start: self.id_start,
                id_end: self.id_end,
                distance: self.distance,
            }
            .into());
        }

        Ok(())
    }
}
