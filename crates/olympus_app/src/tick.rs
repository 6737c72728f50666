//! Fleet tick loop.
//!
//! Each tick runs the same command sequence against every engine:
//!
//! 1. Set throttle to `tick_index * throttle_step`.
//! 2. Set the commanded airspeed and adjust the intake doors.
//! 3. Advance the engine, intake and exhaust nozzle simulations.
//! 4. Emit status, intake, exhaust, lifetime and spec reports.
//!
//! Rejected commands are logged by the engine and the loop carries on. The
//! fleet is started before the first tick and stopped after the last one,
//! including when the shutdown flag cuts the run short.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use olympus_engine::{Pacer, WearComponent};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::fleet::Fleet;
use crate::output::{Report, ReportSink};

/// Configuration for the fleet tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Number of ticks to run.
    pub max_ticks: u64,
    /// Throttle increase per tick, in percent.
    pub throttle_step: f64,
    /// Airspeed commanded on every tick, in km/h.
    pub airspeed: f64,
    /// Simulated hours per tick.
    pub tick_hours: f64,
    /// Real-time pause between ticks.
    pub interval: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        TickConfig::from(&RunConfig::default())
    }
}

impl From<&RunConfig> for TickConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            max_ticks: config.ticks,
            throttle_step: config.throttle_step,
            airspeed: config.airspeed,
            tick_hours: config.tick_hours,
            interval: config.tick_interval(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks that ran to completion.
    pub ticks: u64,
    /// Commands rejected by engines during the run.
    pub rejected_commands: u64,
    /// Whether the run was cut short by the shutdown flag.
    pub interrupted: bool,
}

/// The fleet tick loop state.
#[derive(Debug)]
pub struct FleetLoop {
    /// Current tick counter.
    tick_id: u64,
    /// Tick configuration.
    config: TickConfig,
    /// The engines being driven.
    fleet: Fleet,
    /// Commands rejected so far.
    rejected_commands: u64,
    /// Components already reported as past their rated life.
    exhausted: HashSet<(u32, WearComponent)>,
}

impl FleetLoop {
    /// Create a new tick loop over `fleet`.
    #[must_use]
    pub fn new(config: TickConfig, fleet: Fleet) -> Self {
        Self {
            tick_id: 0,
            config,
            fleet,
            rejected_commands: 0,
            exhausted: HashSet::new(),
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns a reference to the fleet.
    #[must_use]
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Run one tick across the whole fleet.
    ///
    /// # Errors
    ///
    /// Returns an error if the report sink fails.
    pub fn tick(&mut self, sink: &mut dyn ReportSink) -> std::io::Result<()> {
        let throttle = self.tick_id as f64 * self.config.throttle_step;
        self.tick_id += 1;
        let hours = self.config.tick_hours;

        debug!(
            tick_id = self.tick_id,
            throttle,
            engines = self.fleet.len(),
            "tick start"
        );

        for engine in self.fleet.iter_mut() {
            if engine.set_throttle(throttle).is_err() {
                self.rejected_commands += 1;
            }
            engine.set_airspeed(self.config.airspeed);
            if engine.adjust_doors().is_err() {
                self.rejected_commands += 1;
            }
            engine.tick(hours);
            engine.tick_intake(hours);
            engine.tick_exhaust_nozzle(hours);

            let lifetimes = engine.lifetimes();
            for component in lifetimes.exhausted() {
                if self.exhausted.insert((engine.engine_id(), component)) {
                    warn!(
                        engine_id = engine.engine_id(),
                        %component,
                        remaining_h = lifetimes.remaining(component),
                        "component past rated life"
                    );
                }
            }

            sink.emit(self.tick_id, &Report::Status(engine.status()))?;
            sink.emit(self.tick_id, &Report::Intake(engine.intake_status()))?;
            sink.emit(self.tick_id, &Report::Exhaust(engine.exhaust_status()))?;
            sink.emit(self.tick_id, &Report::Lifetimes(lifetimes))?;
            sink.emit(self.tick_id, &Report::Specs(engine.specs()))?;
        }

        Ok(())
    }

    /// Start the fleet, run the configured number of ticks, then stop the
    /// fleet.
    ///
    /// `shutdown` is checked before every tick and before every pause; once it
    /// is set no further ticks run. The fleet is stopped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the report sink fails. The fleet is still stopped.
    pub fn run(
        &mut self,
        pacer: &dyn Pacer,
        shutdown: &AtomicBool,
        sink: &mut dyn ReportSink,
    ) -> std::io::Result<RunSummary> {
        info!(
            max_ticks = self.config.max_ticks,
            engines = self.fleet.len(),
            "starting tick loop"
        );

        self.fleet.start_all(pacer);
        let result = self.run_ticks(pacer, shutdown, sink);
        self.fleet.stop_all(pacer);

        let interrupted = result?;
        let summary = RunSummary {
            ticks: self.tick_id(),
            rejected_commands: self.rejected_commands,
            interrupted,
        };
        info!(
            ticks = summary.ticks,
            rejected = summary.rejected_commands,
            interrupted,
            "tick loop complete"
        );
        Ok(summary)
    }

    /// Returns `true` if the loop was interrupted.
    fn run_ticks(
        &mut self,
        pacer: &dyn Pacer,
        shutdown: &AtomicBool,
        sink: &mut dyn ReportSink,
    ) -> std::io::Result<bool> {
        while self.tick_id < self.config.max_ticks {
            if shutdown.load(Ordering::SeqCst) {
                warn!(tick_id = self.tick_id, "shutdown requested, ending run early");
                return Ok(true);
            }

            self.tick(sink)?;

            if self.tick_id < self.config.max_ticks && !shutdown.load(Ordering::SeqCst) {
                pacer.pause(self.config.interval);
            }
        }
        Ok(false)
    }
}
