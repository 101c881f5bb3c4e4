use thiserror::Error;

use crate::matrix::location_id::LocationId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Negative distance {distance} from {id_start} to {id_end}")]
    NegativeDistance {
        id_start: LocationId,
        id_end: LocationId,
        distance: f64,
    },
    #[error("Distance from {id_start} to {id_end} is not a finite number")]
    NonFiniteDistance {
        id_start: LocationId,
        id_end: LocationId,
    },
    #[error("Coefficient for vehicle '{vehicle}' must be positive and finite, got {coefficient}")]
    InvalidCoefficient { vehicle: String, coefficient: f64 },
    #[error("Factor of bracket '{bracket}' must be positive and finite, got {factor}")]
    InvalidFactor { bracket: String, factor: f64 },
    #[error("Bracket '{bracket}' starts after it ends")]
    InvertedBracket { bracket: String },
    #[error("Toll schedule has no time brackets")]
    NoBrackets,
    #[error("Threshold band must be in [0, 1), got {0}")]
    InvalidBand(f64),
    #[error("Unknown day name '{0}'")]
    UnknownDay(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TollError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Reference id {0} never appears as id_start")]
    NotFound(LocationId),
}
