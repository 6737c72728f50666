//! Read-only report projections of engine state.
//!
//! Each report is a plain snapshot: building one never mutates the engine.
//! Reports render as human-readable lines through [`fmt::Display`] and as
//! structured records through `serde::Serialize`.

use std::fmt;

use serde::Serialize;

use crate::doors::DoorPositions;
use crate::model::RunState;
use crate::specs::EngineSpecs;

fn open_closed(open: bool) -> &'static str {
    if open { "Open" } else { "Closed" }
}

/// Core operating status: throttle, RPM, temperature and reheat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub engine_id: u32,
    pub run_state: RunState,
    pub throttle_position: f64,
    pub rpm: f64,
    pub temperature_c: f64,
    pub reheat: bool,
    pub airspeed_kmh: f64,
    pub doors: Option<DoorPositions>,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.engine_id;
        writeln!(f, "Engine {id} State: {}", self.run_state)?;
        writeln!(f, "Engine {id} Throttle: {}%", self.throttle_position)?;
        writeln!(f, "Engine {id} RPM: {}", self.rpm)?;
        writeln!(f, "Engine {id} Temperature: {} C", self.temperature_c)?;
        writeln!(f, "Engine {id} Reheat: {}", if self.reheat { "On" } else { "Off" })?;
        writeln!(f, "Engine {id} Airspeed: {} km/h", self.airspeed_kmh)?;
        match self.doors {
            Some(doors) => {
                let (d1, d2, d3) = doors.indices();
                write!(f, "Engine {id} Intake Doors: {d1}/{d2}/{d3}")
            }
            None => write!(f, "Engine {id} Intake Doors: unset"),
        }
    }
}

/// Intake geometry and door status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeStatus {
    pub engine_id: u32,
    pub intake_position: f64,
    pub intake_pressure_ratio: f64,
    pub boundary_layer_removed: bool,
    pub dump_doors_open: bool,
    pub auxiliary_inlet_open: bool,
}

impl fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.engine_id;
        writeln!(f, "Engine {id} Intake Position: {}%", self.intake_position)?;
        writeln!(
            f,
            "Engine {id} Intake Pressure Ratio: {}",
            self.intake_pressure_ratio
        )?;
        writeln!(
            f,
            "Engine {id} Boundary Layer Removed: {}",
            if self.boundary_layer_removed { "Yes" } else { "No" }
        )?;
        writeln!(f, "Engine {id} Dump Doors: {}", open_closed(self.dump_doors_open))?;
        write!(
            f,
            "Engine {id} Auxiliary Inlet: {}",
            open_closed(self.auxiliary_inlet_open)
        )
    }
}

/// Exhaust nozzle status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhaustStatus {
    pub engine_id: u32,
    pub exhaust_nozzle_position: f64,
    pub eyelids_closed: bool,
}

impl fmt::Display for ExhaustStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.engine_id;
        writeln!(
            f,
            "Engine {id} Exhaust Nozzle Position: {}%",
            self.exhaust_nozzle_position
        )?;
        write!(
            f,
            "Engine {id} Exhaust Nozzle Eyelids: {}",
            if self.eyelids_closed { "Closed" } else { "Open" }
        )
    }
}

/// Static specification sheet tagged with the engine it describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecsReport {
    pub engine_id: u32,
    #[serde(flatten)]
    pub specs: EngineSpecs,
}

impl fmt::Display for SpecsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.engine_id;
        let s = &self.specs;
        writeln!(f, "Engine {id} Length: {} meters", s.length_m)?;
        writeln!(f, "Engine {id} Diameter: {} meters", s.diameter_m)?;
        writeln!(f, "Engine {id} Dry Weight: {} kg", s.dry_weight_kg)?;
        writeln!(f, "Engine {id} Max Thrust (Wet): {} N", s.max_thrust_wet_n)?;
        writeln!(f, "Engine {id} Max Thrust (Dry): {} N", s.max_thrust_dry_n)?;
        writeln!(
            f,
            "Engine {id} Overall Pressure Ratio (Stationary): {}",
            s.overall_pressure_ratio_stationary
        )?;
        writeln!(f, "Engine {id} Air Mass Flow: {} kg/s", s.air_mass_flow_kg_s)?;
        writeln!(
            f,
            "Engine {id} Specific Fuel Consumption (Cruise): {} lb/(lbf h)",
            s.specific_fuel_consumption_cruise
        )?;
        write!(
            f,
            "Engine {id} Thrust-to-Weight Ratio: {}",
            s.thrust_to_weight_ratio
        )
    }
}

/// A component whose remaining life is tracked by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WearComponent {
    CompressorBlades,
    TurbineBlades,
    Engine,
}

impl fmt::Display for WearComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WearComponent::CompressorBlades => "compressor blades",
            WearComponent::TurbineBlades => "turbine blades",
            WearComponent::Engine => "engine",
        };
        f.write_str(name)
    }
}

/// Remaining component lifetimes and accumulated operating time.
///
/// Remaining hours are not clamped and go negative once a component is past
/// its rated life.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifetimeReport {
    pub engine_id: u32,
    pub operating_time_h: f64,
    pub compressor_blades_h: f64,
    pub turbine_blades_h: f64,
    pub engine_h: f64,
}

impl LifetimeReport {
    /// Returns the remaining hours for one component.
    #[must_use]
    pub fn remaining(&self, component: WearComponent) -> f64 {
        match component {
            WearComponent::CompressorBlades => self.compressor_blades_h,
            WearComponent::TurbineBlades => self.turbine_blades_h,
            WearComponent::Engine => self.engine_h,
        }
    }

    /// Returns every component with no remaining life (zero or below).
    #[must_use]
    pub fn exhausted(&self) -> Vec<WearComponent> {
        [
            WearComponent::CompressorBlades,
            WearComponent::TurbineBlades,
            WearComponent::Engine,
        ]
        .into_iter()
        .filter(|c| self.remaining(*c) <= 0.0)
        .collect()
    }
}

impl fmt::Display for LifetimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.engine_id;
        writeln!(f, "Engine {id} Operating Time: {} h", self.operating_time_h)?;
        writeln!(
            f,
            "Engine {id} Compressor Blades Remaining: {} h",
            self.compressor_blades_h
        )?;
        writeln!(
            f,
            "Engine {id} Turbine Blades Remaining: {} h",
            self.turbine_blades_h
        )?;
        write!(f, "Engine {id} Engine Life Remaining: {} h", self.engine_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifetimes(compressor: f64, turbine: f64, engine: f64) -> LifetimeReport {
        LifetimeReport {
            engine_id: 1,
            operating_time_h: 0.0,
            compressor_blades_h: compressor,
            turbine_blades_h: turbine,
            engine_h: engine,
        }
    }

    #[test]
    fn test_exhausted_lists_non_positive_counters() {
        let report = lifetimes(0.0, 10.0, -5.0);
        assert_eq!(
            report.exhausted(),
            vec![WearComponent::CompressorBlades, WearComponent::Engine]
        );
        assert!(lifetimes(1.0, 1.0, 1.0).exhausted().is_empty());
    }

    #[test]
    fn test_exhaust_display() {
        let report = ExhaustStatus {
            engine_id: 3,
            exhaust_nozzle_position: 40.0,
            eyelids_closed: true,
        };
        let text = report.to_string();
        assert!(text.contains("Engine 3 Exhaust Nozzle Position: 40%"));
        assert!(text.contains("Engine 3 Exhaust Nozzle Eyelids: Closed"));
    }

    #[test]
    fn test_specs_report_flattens_fields() {
        let report = SpecsReport {
            engine_id: 2,
            specs: EngineSpecs::OLYMPUS_593,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["engine_id"], 2);
        assert_eq!(value["dry_weight_kg"], 3175.0);
        assert!(report.to_string().contains("Engine 2 Thrust-to-Weight Ratio: 5.4"));
    }
}
