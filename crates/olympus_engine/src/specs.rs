//! Static Olympus 593 specification figures.

use serde::Serialize;

/// Fixed size and performance figures for an engine type.
///
/// These are reporting data only; nothing in the model reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineSpecs {
    /// Overall length, in metres.
    pub length_m: f64,
    /// Maximum diameter, in metres.
    pub diameter_m: f64,
    /// Dry weight, in kilograms.
    pub dry_weight_kg: f64,
    /// Maximum thrust with reheat, in newtons.
    pub max_thrust_wet_n: f64,
    /// Maximum thrust without reheat, in newtons.
    pub max_thrust_dry_n: f64,
    /// Overall pressure ratio at static conditions.
    pub overall_pressure_ratio_stationary: f64,
    /// Air mass flow, in kg/s.
    pub air_mass_flow_kg_s: f64,
    /// Specific fuel consumption at cruise, in lb/(lbf h).
    pub specific_fuel_consumption_cruise: f64,
    /// Thrust-to-weight ratio.
    pub thrust_to_weight_ratio: f64,
    /// Rated life of the primary nozzle, in hours.
    pub primary_nozzle_rated_life_h: f64,
    /// Rated life of the thrust reverser, in hours.
    pub thrust_reverser_rated_life_h: f64,
}

impl EngineSpecs {
    /// Rolls-Royce/Snecma Olympus 593 Mk 610.
    pub const OLYMPUS_593: EngineSpecs = EngineSpecs {
        length_m: 4.039,
        diameter_m: 1.212,
        dry_weight_kg: 3175.0,
        max_thrust_wet_n: 169_200.0,
        max_thrust_dry_n: 139_400.0,
        overall_pressure_ratio_stationary: 15.5,
        air_mass_flow_kg_s: 186.0,
        specific_fuel_consumption_cruise: 1.195,
        thrust_to_weight_ratio: 5.4,
        primary_nozzle_rated_life_h: 30_000.0,
        thrust_reverser_rated_life_h: 40_000.0,
    };
}

impl Default for EngineSpecs {
    fn default() -> Self {
        Self::OLYMPUS_593
    }
}
