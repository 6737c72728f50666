//! Engine-model error types.

use std::fmt;

/// A settable engine field that carries a percentage range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Throttle lever position.
    Throttle,
    /// Intake geometry position.
    Intake,
    /// Exhaust nozzle position.
    ExhaustNozzle,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Control::Throttle => "throttle position",
            Control::Intake => "intake position",
            Control::ExhaustNozzle => "exhaust nozzle position",
        };
        f.write_str(name)
    }
}

/// Errors returned when a command is rejected by the engine model.
///
/// All variants are non-fatal: the engine keeps its prior state and the caller
/// may continue issuing commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A percentage control was given a value outside `0..=100`.
    #[error("{control} should be between 0 and 100, got {value}")]
    OutOfRange {
        /// The control that rejected the value.
        control: Control,
        /// The rejected value.
        value: f64,
    },

    /// Reheat was toggled while the throttle was at or below the threshold.
    #[error("reheat can only be toggled above 80% throttle (throttle is {throttle}%)")]
    ReheatInhibited {
        /// Throttle position at the time of the request.
        throttle: f64,
    },

    /// The current airspeed falls outside every door schedule band.
    #[error("no intake door schedule for airspeed {airspeed} km/h")]
    NoDoorBand {
        /// Airspeed at the time of the request.
        airspeed: f64,
    },
}
