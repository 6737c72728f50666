//! # olympus_engine
//!
//! Operating-parameter model of a single Olympus 593 jet engine.
//!
//! This crate provides:
//!
//! - [`EngineModel`] — throttle, reheat, intake and exhaust geometry, derived
//!   RPM/temperature and component wear for one engine.
//! - [`DoorPositions`] — the airspeed-banded intake door schedule.
//! - [`Pacer`] — injectable delay used for cosmetic spool-up/spool-down pauses.
//! - [`report`] — read-only status, intake, exhaust, spec and lifetime reports.
//! - [`ValidationError`] — the rejection returned by range-checked and gated
//!   commands.
//!
//! ## Usage
//!
//! ```rust
//! use olympus_engine::{EngineModel, InstantPacer};
//!
//! let pacer = InstantPacer::new();
//! let mut engine = EngineModel::new(1);
//! engine.start(&pacer);
//! engine.set_throttle(85.0).unwrap();
//! assert_eq!(engine.toggle_reheat(), Ok(true));
//! engine.tick(1.0);
//! assert_eq!(engine.rpm(), 1850.0);
//! engine.stop(&pacer);
//! ```

pub mod doors;
pub mod error;
pub mod model;
pub mod pacer;
pub mod report;
pub mod specs;

pub use doors::{DoorPositions, DoorSetting};
pub use error::{Control, ValidationError};
pub use model::{EngineModel, RunState};
pub use pacer::{InstantPacer, Pacer, ThreadPacer};
pub use report::{
    EngineStatus, ExhaustStatus, IntakeStatus, LifetimeReport, SpecsReport, WearComponent,
};
pub use specs::EngineSpecs;
