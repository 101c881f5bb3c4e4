use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Moto,
    Car,
    Rv,
    Bus,
    Truck,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Moto,
        VehicleType::Car,
        VehicleType::Rv,
        VehicleType::Bus,
        VehicleType::Truck,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            VehicleType::Moto => "moto",
            VehicleType::Car => "car",
            VehicleType::Rv => "rv",
            VehicleType::Bus => "bus",
            VehicleType::Truck => "truck",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PerVehicle<T> {
    pub moto: T,
    pub car: T,
    pub rv: T,
    pub bus: T,
    pub truck: T,
}

impl<T: Copy> PerVehicle<T> {
    pub fn from_fn(f: impl Fn(VehicleType) -> T) -> Self {
        PerVehicle {
            moto: f(VehicleType::Moto),
            car: f(VehicleType::Car),
            rv: f(VehicleType::Rv),
            bus: f(VehicleType::Bus),
            truck: f(VehicleType::Truck),
        }
    }

    pub fn get(&self, vehicle: VehicleType) -> T {
        match vehicle {
            VehicleType::Moto => self.moto,
            VehicleType::Car => self.car,
            VehicleType::Rv => self.rv,
            VehicleType::Bus => self.bus,
            VehicleType::Truck => self.truck,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleType, T)> + '_ {
        VehicleType::ALL
            .into_iter()
            .map(|vehicle| (vehicle, self.get(vehicle)))
    }
}

/// Toll per unit of distance for each vehicle type.
pub type VehicleRates = PerVehicle<f64>;

/// Toll amounts of a single row.
pub type VehicleTolls = PerVehicle<f64>;

impl Default for VehicleRates {
    fn default() -> Self {
        VehicleRates {
            moto: 0.8,
            car: 1.2,
            rv: 1.5,
            bus: 2.2,
            truck: 3.6,
        }
    }
}

impl VehicleRates {
    /// Coefficients must be positive so tolls grow with distance.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self
            .iter()
            .find(|(_, coefficient)| !coefficient.is_finite() || *coefficient <= 0.0)
        {
            Some((vehicle, coefficient)) => Err(ValidationError::InvalidCoefficient {
                vehicle: vehicle.to_string(),
                coefficient,
            }),
            None => Ok(()),
        }
    }
}

impl VehicleTolls {
    pub fn from_distance(distance: f64, rates: &VehicleRates) -> Self {
        VehicleTolls::from_fn(|vehicle| distance * rates.get(vehicle))
    }
}
