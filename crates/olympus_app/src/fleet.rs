//! The set of engines driven by the simulation.
//!
//! A [`Fleet`] owns its engines outright. It is built by `main` and moved into
//! the tick loop; nothing about it is process-global.

use std::time::Duration;

use olympus_engine::{EngineModel, Pacer};
use tracing::info;

/// An owned, ordered collection of engines.
#[derive(Debug, Default)]
pub struct Fleet {
    engines: Vec<EngineModel>,
}

impl Fleet {
    /// Create a fleet of `count` engines numbered `1..=count`.
    #[must_use]
    pub fn new(count: u32, spool_delay: Duration) -> Self {
        let engines = (1..=count)
            .map(|id| EngineModel::new(id).with_spool_delay(spool_delay))
            .collect();
        Self { engines }
    }

    /// Start every engine, one after another.
    pub fn start_all(&mut self, pacer: &dyn Pacer) {
        info!(engines = self.engines.len(), "starting fleet");
        for engine in &mut self.engines {
            engine.start(pacer);
        }
    }

    /// Stop every engine, one after another.
    pub fn stop_all(&mut self, pacer: &dyn Pacer) {
        info!(engines = self.engines.len(), "stopping fleet");
        for engine in &mut self.engines {
            engine.stop(pacer);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineModel> {
        self.engines.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EngineModel> {
        self.engines.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }
}

#[cfg(test)]
mod tests {
    use olympus_engine::{InstantPacer, RunState};

    use super::*;

    #[test]
    fn test_engines_numbered_from_one() {
        let fleet = Fleet::new(4, Duration::ZERO);
        let ids: Vec<u32> = fleet.iter().map(EngineModel::engine_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(fleet.len(), 4);
    }

    #[test]
    fn test_start_and_stop_all() {
        let pacer = InstantPacer::new();
        let mut fleet = Fleet::new(3, Duration::from_millis(10));

        fleet.start_all(&pacer);
        assert!(fleet.iter().all(|e| e.run_state() == RunState::Running));

        fleet.stop_all(&pacer);
        assert!(fleet.iter().all(|e| e.run_state() == RunState::Stopped));
        assert_eq!(pacer.requested().len(), 6);
        assert_eq!(pacer.total(), Duration::from_millis(60));
    }

    #[test]
    fn test_engines_are_independent() {
        let mut fleet = Fleet::new(2, Duration::ZERO);
        if let Some(first) = fleet.iter_mut().next() {
            first.set_throttle(90.0).unwrap();
        }
        let throttles: Vec<f64> = fleet.iter().map(EngineModel::throttle_position).collect();
        assert_eq!(throttles, vec![90.0, 0.0]);
    }
}
