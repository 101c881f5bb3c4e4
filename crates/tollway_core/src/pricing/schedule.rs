use std::{io::Read, sync::Arc};

use jiff::civil::{Time, Weekday, time};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

use crate::{
    error::{TollError, ValidationError},
    pricing::{vehicle::VehicleRates, weekday::is_weekend},
};

/// A time-of-day interval with its weekday and weekend multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TollBracket {
    /// Shared with every [`BracketMatch`](crate::pricing::time_based::BracketMatch) it produces.
    pub name: Arc<str>,
    pub start: Time,
    /// Inclusive.
    pub end: Time,
    pub weekday_factor: f64,
    pub weekend_factor: f64,
}

impl TollBracket {
    pub fn new(
        name: &str,
        start: Time,
        end: Time,
        weekday_factor: f64,
        weekend_factor: f64,
    ) -> Self {
        TollBracket {
            name: Arc::from(name),
            start,
            end,
            weekday_factor,
            weekend_factor,
        }
    }

    /// Whether `[start, end]` lies fully inside the bracket. A reversed span
    /// (`end < start`) wraps past midnight and is never contained.
    pub fn contains(&self, start: Time, end: Time) -> bool {
        start <= end && self.start <= start && end <= self.end
    }

    pub fn factor(&self, day: Weekday) -> f64 {
        if is_weekend(day) {
            self.weekend_factor
        } else {
            self.weekday_factor
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvertedBracket {
                bracket: self.name.to_string(),
            });
        }

        for factor in [self.weekday_factor, self.weekend_factor] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ValidationError::InvalidFactor {
                    bracket: self.name.to_string(),
                    factor,
                });
            }
        }

        Ok(())
    }
}

/// Pricing configuration: vehicle coefficients and time brackets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TollSchedule {
    pub vehicle_rates: VehicleRates,
    /// Checked in order, the first bracket containing a window applies.
    pub brackets: Vec<TollBracket>,
}

impl Default for TollSchedule {
    fn default() -> Self {
        TollSchedule {
            vehicle_rates: VehicleRates::default(),
            brackets: vec![
                TollBracket::new("morning", time(0, 0, 0, 0), time(10, 0, 0, 0), 0.8, 0.7),
                TollBracket::new("day", time(10, 0, 0, 0), time(18, 0, 0, 0), 1.2, 0.7),
                TollBracket::new("evening", time(18, 0, 0, 0), time(23, 59, 59, 0), 0.8, 0.7),
            ],
        }
    }
}

impl TollSchedule {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.vehicle_rates.validate()?;

        if self.brackets.is_empty() {
            return Err(ValidationError::NoBrackets);
        }

        self.brackets.iter().try_for_each(TollBracket::validate)
    }

    /// First bracket fully containing `[start, end]`.
    pub fn find_bracket(&self, start: Time, end: Time) -> Option<&TollBracket> {
        self.brackets
            .iter()
            .find(|bracket| bracket.contains(start, end))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, anyhow::Error> {
        let schedule: TollSchedule = serde_json::from_reader(reader)?;
        schedule.validate().map_err(TollError::from)?;
        Ok(schedule)
    }

    pub fn json_schema() -> Schema {
        schema_for!(TollSchedule)
    }
}
