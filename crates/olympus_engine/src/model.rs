//! The simulated engine.
//!
//! An [`EngineModel`] owns all state for one engine: control inputs, derived
//! RPM and temperature, wear counters, intake and exhaust geometry. Commands
//! that carry a range or a precondition return [`ValidationError`] and leave
//! the prior state untouched.
//!
//! Three threshold behaviours exist, all independent of each other:
//!
//! - reheat may only be toggled while throttle is above 80%;
//! - the boundary layer is removed (once, permanently) when the intake opens
//!   past 60%;
//! - the exhaust eyelids close automatically when throttle is above 80%.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::doors::DoorPositions;
use crate::error::{Control, ValidationError};
use crate::pacer::Pacer;
use crate::report::{
    EngineStatus, ExhaustStatus, IntakeStatus, LifetimeReport, SpecsReport,
};
use crate::specs::EngineSpecs;

/// Throttle position above which reheat can be toggled and eyelids auto-close.
pub const REHEAT_THRESHOLD: f64 = 80.0;
/// Intake position above which the boundary layer is removed.
pub const BOUNDARY_LAYER_THRESHOLD: f64 = 60.0;
/// Default spool-up / spool-down delay for start and stop.
pub const DEFAULT_SPOOL_DELAY: Duration = Duration::from_secs(2);

const COMPRESSOR_BLADES_LIFETIME_H: f64 = 10_000.0;
const TURBINE_BLADES_LIFETIME_H: f64 = 10_000.0;
const ENGINE_LIFETIME_H: f64 = 25_000.0;
const INTAKE_PRESSURE_RATIO: f64 = 1.0;

/// Reported lifecycle state. Purely observational: it gates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Stopped => f.write_str("Stopped"),
            RunState::Running => f.write_str("Running"),
        }
    }
}

/// Remaining life of the tracked components, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wear {
    compressor_blades: f64,
    turbine_blades: f64,
    engine: f64,
}

impl Wear {
    fn new() -> Self {
        Self {
            compressor_blades: COMPRESSOR_BLADES_LIFETIME_H,
            turbine_blades: TURBINE_BLADES_LIFETIME_H,
            engine: ENGINE_LIFETIME_H,
        }
    }

    fn consume(&mut self, hours: f64) {
        self.compressor_blades -= hours;
        self.turbine_blades -= hours;
        self.engine -= hours;
    }
}

/// Operating-parameter model of a single engine.
#[derive(Debug, Clone)]
pub struct EngineModel {
    engine_id: u32,
    run_state: RunState,
    spool_delay: Duration,

    throttle_position: f64,
    reheat: bool,
    airspeed: f64,
    rpm: f64,
    temperature: f64,

    operating_time: f64,
    wear: Wear,

    intake_position: f64,
    intake_pressure_ratio: f64,
    boundary_layer_removed: bool,
    dump_doors_open: bool,
    auxiliary_inlet_open: bool,

    exhaust_nozzle_position: f64,
    eyelids_closed: bool,

    /// `None` until the first successful [`EngineModel::adjust_doors`].
    doors: Option<DoorPositions>,

    specs: EngineSpecs,
}

impl EngineModel {
    /// Create an engine at rest with factory defaults.
    #[must_use]
    pub fn new(engine_id: u32) -> Self {
        Self {
            engine_id,
            run_state: RunState::Stopped,
            spool_delay: DEFAULT_SPOOL_DELAY,
            throttle_position: 0.0,
            reheat: false,
            airspeed: 0.0,
            rpm: 0.0,
            temperature: 0.0,
            operating_time: 0.0,
            wear: Wear::new(),
            intake_position: 0.0,
            intake_pressure_ratio: INTAKE_PRESSURE_RATIO,
            boundary_layer_removed: false,
            dump_doors_open: false,
            auxiliary_inlet_open: false,
            exhaust_nozzle_position: 0.0,
            eyelids_closed: false,
            doors: None,
            specs: EngineSpecs::OLYMPUS_593,
        }
    }

    /// Override the start/stop spool delay.
    #[must_use]
    pub fn with_spool_delay(mut self, delay: Duration) -> Self {
        self.spool_delay = delay;
        self
    }

    /// Spool the engine up.
    pub fn start(&mut self, pacer: &dyn Pacer) {
        info!(engine_id = self.engine_id, "engine starting");
        pacer.pause(self.spool_delay);
        self.run_state = RunState::Running;
        info!(engine_id = self.engine_id, "engine started");
    }

    /// Spool the engine down.
    pub fn stop(&mut self, pacer: &dyn Pacer) {
        info!(engine_id = self.engine_id, "engine shutting down");
        pacer.pause(self.spool_delay);
        self.run_state = RunState::Stopped;
        info!(engine_id = self.engine_id, "engine shut down");
    }

    /// Set the throttle position, in percent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `position` is outside
    /// `0..=100`.
    pub fn set_throttle(&mut self, position: f64) -> Result<(), ValidationError> {
        self.throttle_position = self.checked_percent(Control::Throttle, position)?;
        info!(engine_id = self.engine_id, throttle = position, "throttle set");
        Ok(())
    }

    /// Toggle reheat. Returns the new reheat state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ReheatInhibited`] unless throttle is above
    /// [`REHEAT_THRESHOLD`].
    pub fn toggle_reheat(&mut self) -> Result<bool, ValidationError> {
        if self.throttle_position <= REHEAT_THRESHOLD {
            let err = ValidationError::ReheatInhibited {
                throttle: self.throttle_position,
            };
            warn!(engine_id = self.engine_id, %err, "reheat rejected");
            return Err(err);
        }
        self.reheat = !self.reheat;
        let reheat = if self.reheat { "on" } else { "off" };
        info!(engine_id = self.engine_id, reheat, "reheat toggled");
        Ok(self.reheat)
    }

    /// Toggle the exhaust nozzle eyelids. Returns `true` if now closed.
    pub fn toggle_eyelids(&mut self) -> bool {
        self.eyelids_closed = !self.eyelids_closed;
        let eyelids = if self.eyelids_closed { "closed" } else { "open" };
        info!(engine_id = self.engine_id, eyelids, "exhaust nozzle eyelids toggled");
        self.eyelids_closed
    }

    /// Toggle the intake dump doors. Returns `true` if now open.
    pub fn toggle_intake_dump_doors(&mut self) -> bool {
        self.dump_doors_open = !self.dump_doors_open;
        let dump_doors = if self.dump_doors_open { "open" } else { "closed" };
        info!(engine_id = self.engine_id, dump_doors, "intake dump doors toggled");
        self.dump_doors_open
    }

    /// Toggle the auxiliary inlet. Returns `true` if now open.
    pub fn toggle_auxiliary_inlet(&mut self) -> bool {
        self.auxiliary_inlet_open = !self.auxiliary_inlet_open;
        let auxiliary_inlet = if self.auxiliary_inlet_open { "open" } else { "closed" };
        info!(engine_id = self.engine_id, auxiliary_inlet, "auxiliary inlet toggled");
        self.auxiliary_inlet_open
    }

    /// Set the intake geometry position, in percent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `position` is outside
    /// `0..=100`.
    pub fn set_intake_position(&mut self, position: f64) -> Result<(), ValidationError> {
        self.intake_position = self.checked_percent(Control::Intake, position)?;
        info!(engine_id = self.engine_id, intake = position, "intake position set");
        Ok(())
    }

    /// Set the exhaust nozzle position, in percent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `position` is outside
    /// `0..=100`.
    pub fn set_exhaust_nozzle_position(&mut self, position: f64) -> Result<(), ValidationError> {
        self.exhaust_nozzle_position = self.checked_percent(Control::ExhaustNozzle, position)?;
        info!(
            engine_id = self.engine_id,
            nozzle = position,
            "exhaust nozzle position set"
        );
        Ok(())
    }

    /// Set the airspeed, in km/h. Any value is accepted.
    pub fn set_airspeed(&mut self, airspeed: f64) {
        self.airspeed = airspeed;
        info!(engine_id = self.engine_id, airspeed_kmh = airspeed, "airspeed set");
    }

    /// Position the intake doors for the current airspeed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoDoorBand`] when the airspeed is outside
    /// every scheduled band. Previous door positions are kept.
    pub fn adjust_doors(&mut self) -> Result<DoorPositions, ValidationError> {
        let Some(doors) = DoorPositions::for_airspeed(self.airspeed) else {
            let err = ValidationError::NoDoorBand {
                airspeed: self.airspeed,
            };
            warn!(engine_id = self.engine_id, %err, "door adjustment rejected");
            return Err(err);
        };
        self.doors = Some(doors);
        let (door1, door2, door3) = doors.indices();
        debug!(engine_id = self.engine_id, door1, door2, door3, "doors adjusted");
        Ok(doors)
    }

    /// Advance the core simulation by `elapsed_hours`.
    ///
    /// RPM and temperature are recomputed from throttle alone, overwriting
    /// any previous value. Wear counters decrease by `elapsed_hours` with no
    /// floor.
    pub fn tick(&mut self, elapsed_hours: f64) {
        self.rpm = 1000.0 + 10.0 * self.throttle_position;
        self.temperature = 150.0 + 0.2 * self.rpm;
        self.wear.consume(elapsed_hours);
        self.operating_time += elapsed_hours;
        debug!(
            engine_id = self.engine_id,
            rpm = self.rpm,
            temperature = self.temperature,
            elapsed_hours,
            "engine ticked"
        );
    }

    /// Advance the intake simulation. Returns `true` if the boundary layer was
    /// removed by this call.
    pub fn tick_intake(&mut self, _elapsed_hours: f64) -> bool {
        if self.intake_position > BOUNDARY_LAYER_THRESHOLD && !self.boundary_layer_removed {
            self.boundary_layer_removed = true;
            info!(engine_id = self.engine_id, "boundary layer removed");
            return true;
        }
        false
    }

    /// Advance the exhaust nozzle simulation. Returns `true` if the eyelids
    /// were closed by this call.
    pub fn tick_exhaust_nozzle(&mut self, _elapsed_hours: f64) -> bool {
        if self.throttle_position > REHEAT_THRESHOLD && !self.eyelids_closed {
            self.toggle_eyelids();
            return true;
        }
        false
    }

    fn checked_percent(&self, control: Control, value: f64) -> Result<f64, ValidationError> {
        if (0.0..=100.0).contains(&value) {
            Ok(value)
        } else {
            let err = ValidationError::OutOfRange { control, value };
            warn!(engine_id = self.engine_id, %err, "command rejected");
            Err(err)
        }
    }

    #[must_use]
    pub fn engine_id(&self) -> u32 {
        self.engine_id
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn throttle_position(&self) -> f64 {
        self.throttle_position
    }

    #[must_use]
    pub fn reheat(&self) -> bool {
        self.reheat
    }

    #[must_use]
    pub fn airspeed(&self) -> f64 {
        self.airspeed
    }

    #[must_use]
    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub fn intake_position(&self) -> f64 {
        self.intake_position
    }

    #[must_use]
    pub fn boundary_layer_removed(&self) -> bool {
        self.boundary_layer_removed
    }

    #[must_use]
    pub fn dump_doors_open(&self) -> bool {
        self.dump_doors_open
    }

    #[must_use]
    pub fn auxiliary_inlet_open(&self) -> bool {
        self.auxiliary_inlet_open
    }

    #[must_use]
    pub fn exhaust_nozzle_position(&self) -> f64 {
        self.exhaust_nozzle_position
    }

    #[must_use]
    pub fn eyelids_closed(&self) -> bool {
        self.eyelids_closed
    }

    /// Returns the door positions, or `None` if they were never adjusted.
    #[must_use]
    pub fn doors(&self) -> Option<DoorPositions> {
        self.doors
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            engine_id: self.engine_id,
            run_state: self.run_state,
            throttle_position: self.throttle_position,
            rpm: self.rpm,
            temperature_c: self.temperature,
            reheat: self.reheat,
            airspeed_kmh: self.airspeed,
            doors: self.doors,
        }
    }

    #[must_use]
    pub fn intake_status(&self) -> IntakeStatus {
        IntakeStatus {
            engine_id: self.engine_id,
            intake_position: self.intake_position,
            intake_pressure_ratio: self.intake_pressure_ratio,
            boundary_layer_removed: self.boundary_layer_removed,
            dump_doors_open: self.dump_doors_open,
            auxiliary_inlet_open: self.auxiliary_inlet_open,
        }
    }

    #[must_use]
    pub fn exhaust_status(&self) -> ExhaustStatus {
        ExhaustStatus {
            engine_id: self.engine_id,
            exhaust_nozzle_position: self.exhaust_nozzle_position,
            eyelids_closed: self.eyelids_closed,
        }
    }

    #[must_use]
    pub fn specs(&self) -> SpecsReport {
        SpecsReport {
            engine_id: self.engine_id,
            specs: self.specs,
        }
    }

    #[must_use]
    pub fn lifetimes(&self) -> LifetimeReport {
        LifetimeReport {
            engine_id: self.engine_id,
            operating_time_h: self.operating_time,
            compressor_blades_h: self.wear.compressor_blades,
            turbine_blades_h: self.wear.turbine_blades,
            engine_h: self.wear.engine,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pacer::InstantPacer;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_defaults() {
        let engine = EngineModel::new(7);
        assert_eq!(engine.engine_id(), 7);
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert_eq!(engine.throttle_position(), 0.0);
        assert!(!engine.reheat());
        assert!(engine.doors().is_none());
        let life = engine.lifetimes();
        assert_eq!(life.compressor_blades_h, 10_000.0);
        assert_eq!(life.turbine_blades_h, 10_000.0);
        assert_eq!(life.engine_h, 25_000.0);
        assert_eq!(life.operating_time_h, 0.0);
        assert_eq!(engine.intake_status().intake_pressure_ratio, 1.0);
    }

    #[test]
    fn test_set_throttle_accepts_full_range() {
        let mut engine = EngineModel::new(1);
        for p in [0.0, 0.5, 25.0, 80.0, 99.9, 100.0] {
            engine.set_throttle(p).unwrap();
            assert_eq!(engine.throttle_position(), p);
        }
    }

    #[test]
    fn test_set_throttle_rejects_out_of_range() {
        let mut engine = EngineModel::new(1);
        engine.set_throttle(40.0).unwrap();
        for p in [-0.1, 100.1, 125.0, f64::NAN, f64::INFINITY] {
            let err = engine.set_throttle(p).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::OutOfRange {
                    control: Control::Throttle,
                    ..
                }
            ));
            assert_eq!(engine.throttle_position(), 40.0);
        }
    }

    #[test]
    fn test_intake_and_nozzle_range_checked() {
        let mut engine = EngineModel::new(1);
        engine.set_intake_position(70.0).unwrap();
        engine.set_exhaust_nozzle_position(30.0).unwrap();
        assert!(engine.set_intake_position(101.0).is_err());
        assert!(engine.set_exhaust_nozzle_position(-5.0).is_err());
        assert_eq!(engine.intake_position(), 70.0);
        assert_eq!(engine.exhaust_nozzle_position(), 30.0);
    }

    #[test]
    fn test_reheat_gated_by_throttle() {
        let mut engine = EngineModel::new(1);
        engine.set_throttle(80.0).unwrap();
        assert_eq!(
            engine.toggle_reheat(),
            Err(ValidationError::ReheatInhibited { throttle: 80.0 })
        );
        assert!(!engine.reheat());

        engine.set_throttle(81.0).unwrap();
        assert_eq!(engine.toggle_reheat(), Ok(true));
        assert_eq!(engine.toggle_reheat(), Ok(false));
    }

    #[test]
    fn test_reheat_scenario() {
        let mut engine = EngineModel::new(1);
        engine.set_throttle(85.0).unwrap();
        assert_eq!(engine.toggle_reheat(), Ok(true));
        assert!(engine.reheat());

        engine.set_throttle(50.0).unwrap();
        assert!(engine.toggle_reheat().is_err());
        // Reheat is not forced off when throttle drops.
        assert!(engine.reheat());
    }

    #[test]
    fn test_unconditional_toggles() {
        let mut engine = EngineModel::new(1);
        assert!(engine.toggle_eyelids());
        assert!(!engine.toggle_eyelids());
        assert!(engine.toggle_intake_dump_doors());
        assert!(engine.dump_doors_open());
        assert!(engine.toggle_auxiliary_inlet());
        assert!(!engine.toggle_auxiliary_inlet());
        assert!(!engine.auxiliary_inlet_open());
    }

    #[test]
    fn test_tick_derives_rpm_and_temperature() {
        let mut engine = EngineModel::new(1);
        engine.set_throttle(75.0).unwrap();
        engine.tick(1.0);
        assert!(approx(engine.rpm(), 1750.0));
        assert!(approx(engine.temperature(), 500.0));

        // No inertia: the same throttle gives the same values.
        engine.tick(0.0);
        assert!(approx(engine.rpm(), 1750.0));

        engine.set_throttle(0.0).unwrap();
        engine.tick(0.0);
        assert!(approx(engine.rpm(), 1000.0));
        assert!(approx(engine.temperature(), 350.0));
    }

    #[test]
    fn test_wear_decreases_without_floor() {
        let mut engine = EngineModel::new(1);
        engine.tick(2.5);
        engine.tick(4.0);
        let life = engine.lifetimes();
        assert!(approx(life.engine_h, 25_000.0 - 6.5));
        assert!(approx(life.compressor_blades_h, 10_000.0 - 6.5));
        assert!(approx(life.operating_time_h, 6.5));

        engine.tick(30_000.0);
        let life = engine.lifetimes();
        assert!(life.engine_h < 0.0);
        assert_eq!(life.exhausted().len(), 3);
    }

    #[test]
    fn test_boundary_layer_latch() {
        let mut engine = EngineModel::new(1);
        engine.set_intake_position(60.0).unwrap();
        assert!(!engine.tick_intake(1.0));
        assert!(!engine.boundary_layer_removed());

        engine.set_intake_position(61.0).unwrap();
        assert!(engine.tick_intake(1.0));
        assert!(engine.boundary_layer_removed());

        engine.set_intake_position(0.0).unwrap();
        assert!(!engine.tick_intake(1.0));
        assert!(engine.boundary_layer_removed());
    }

    #[test]
    fn test_eyelids_auto_close() {
        let mut engine = EngineModel::new(1);
        engine.set_throttle(80.0).unwrap();
        assert!(!engine.tick_exhaust_nozzle(1.0));
        assert!(!engine.eyelids_closed());

        engine.set_throttle(100.0).unwrap();
        assert!(engine.tick_exhaust_nozzle(1.0));
        assert!(engine.eyelids_closed());
        // Already closed: nothing to do.
        assert!(!engine.tick_exhaust_nozzle(1.0));
        assert!(engine.eyelids_closed());
    }

    #[test]
    fn test_adjust_doors_bands() {
        let mut engine = EngineModel::new(1);
        for (speed, expected) in [
            (0.0, (1, 1, 1)),
            (455.0, (1, 1, 1)),
            (456.0, (2, 2, 1)),
            (1234.0, (2, 2, 1)),
            (2436.0, (3, 3, 1)),
        ] {
            engine.set_airspeed(speed);
            let doors = engine.adjust_doors().unwrap();
            assert_eq!(doors.indices(), expected);
            assert_eq!(engine.doors(), Some(doors));
        }
    }

    #[test]
    fn test_adjust_doors_overspeed_keeps_previous() {
        let mut engine = EngineModel::new(1);
        engine.set_airspeed(2437.0);
        assert_eq!(
            engine.adjust_doors(),
            Err(ValidationError::NoDoorBand { airspeed: 2437.0 })
        );
        assert!(engine.doors().is_none());

        engine.set_airspeed(1500.0);
        engine.adjust_doors().unwrap();
        engine.set_airspeed(2437.0);
        assert!(engine.adjust_doors().is_err());
        assert_eq!(engine.doors().map(|d| d.indices()), Some((3, 3, 1)));
    }

    #[test]
    fn test_start_stop_uses_pacer() {
        let pacer = InstantPacer::new();
        let mut engine = EngineModel::new(1).with_spool_delay(Duration::from_millis(250));
        engine.start(&pacer);
        assert_eq!(engine.run_state(), RunState::Running);
        engine.stop(&pacer);
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert_eq!(
            pacer.requested(),
            vec![Duration::from_millis(250), Duration::from_millis(250)]
        );
    }

    #[test]
    fn test_commands_work_while_stopped() {
        let mut engine = EngineModel::new(1);
        assert_eq!(engine.run_state(), RunState::Stopped);
        engine.set_throttle(90.0).unwrap();
        assert!(engine.toggle_reheat().is_ok());
    }

    #[test]
    fn test_status_report_reflects_state() {
        let mut engine = EngineModel::new(4);
        engine.set_throttle(50.0).unwrap();
        engine.set_airspeed(400.0);
        engine.adjust_doors().unwrap();
        engine.tick(1.0);

        let status = engine.status();
        assert_eq!(status.engine_id, 4);
        assert!(approx(status.rpm, 1500.0));
        let text = status.to_string();
        assert!(text.contains("Engine 4 RPM: 1500"));
        assert!(text.contains("Engine 4 Intake Doors: 1/1/1"));

        let intake = engine.intake_status().to_string();
        assert!(intake.contains("Engine 4 Boundary Layer Removed: No"));
        assert!(intake.contains("Engine 4 Dump Doors: Closed"));
    }
}
