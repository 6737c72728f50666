//! Run configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional TOML file, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur while loading or validating a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`RunConfig`].
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Configuration for a fleet simulation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Number of engines in the fleet. Engines are numbered from 1.
    pub engine_count: u32,
    /// Number of ticks to simulate.
    pub ticks: u64,
    /// Throttle increase per tick, in percent (tick `i` uses `i * step`).
    pub throttle_step: f64,
    /// Airspeed commanded on every tick, in km/h.
    pub airspeed: f64,
    /// Simulated hours elapsed per tick.
    pub tick_hours: f64,
    /// Real-time pause between ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Real-time spool-up/spool-down pause for start and stop, in milliseconds.
    pub spool_delay_ms: u64,
    /// Emit reports as JSON lines instead of text.
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            engine_count: 4,
            ticks: 5,
            throttle_step: 25.0,
            airspeed: 400.0,
            tick_hours: 1.0,
            tick_interval_ms: 1000,
            spool_delay_ms: 2000,
            json: false,
        }
    }
}

/// Command-line overrides for [`RunConfig`]. Unset flags keep the file or
/// default value.
#[derive(Debug, Default, clap::Args)]
pub struct Overrides {
    /// Number of engines
    #[arg(long)]
    pub engines: Option<u32>,

    /// Number of ticks to simulate
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Throttle increase per tick, in percent
    #[arg(long)]
    pub throttle_step: Option<f64>,

    /// Airspeed in km/h
    #[arg(long, allow_negative_numbers = true)]
    pub airspeed: Option<f64>,

    /// Simulated hours per tick
    #[arg(long)]
    pub tick_hours: Option<f64>,

    /// Pause between ticks in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Engine start/stop pause in milliseconds
    #[arg(long)]
    pub spool_ms: Option<u64>,

    /// Emit reports as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl RunConfig {
    /// Load a configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply command-line overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(n) = overrides.engines {
            self.engine_count = n;
        }
        if let Some(n) = overrides.ticks {
            self.ticks = n;
        }
        if let Some(step) = overrides.throttle_step {
            self.throttle_step = step;
        }
        if let Some(speed) = overrides.airspeed {
            self.airspeed = speed;
        }
        if let Some(hours) = overrides.tick_hours {
            self.tick_hours = hours;
        }
        if let Some(ms) = overrides.interval_ms {
            self.tick_interval_ms = ms;
        }
        if let Some(ms) = overrides.spool_ms {
            self.spool_delay_ms = ms;
        }
        self.json |= overrides.json;
        self
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine_count == 0 {
            return Err(ConfigError::Invalid {
                field: "engine_count",
                reason: "at least one engine is required",
            });
        }
        if !self.tick_hours.is_finite() || self.tick_hours < 0.0 {
            return Err(ConfigError::Invalid {
                field: "tick_hours",
                reason: "must be a finite, non-negative number",
            });
        }
        if !self.throttle_step.is_finite() {
            return Err(ConfigError::Invalid {
                field: "throttle_step",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Returns the pause between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Returns the start/stop spool delay.
    #[must_use]
    pub fn spool_delay(&self) -> Duration {
        Duration::from_millis(self.spool_delay_ms)
    }
}
