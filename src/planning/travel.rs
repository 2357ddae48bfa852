//! Travel time and battery drain estimates backed by cached lane distances.

use std::sync::Arc;

use super::graph::NavGraph;
use super::heuristic::ShortestPathFactory;
use crate::cache::CacheManagerMap;
use crate::config::ConfigError;
use crate::task::{TravelEstimate, TravelModel};
use crate::time::seconds;
use crate::WaypointId;

/// Converts cached shortest lane distances into travel estimates for a robot
/// moving at a nominal speed with a linear battery drain.
pub struct TravelEstimator {
    distances: CacheManagerMap<ShortestPathFactory>,
    nominal_speed: f64,
    drain_per_metre: f64,
}

impl TravelEstimator {
    /// # Arguments
    ///
    /// * `graph` - Lane graph the robot moves on
    /// * `nominal_speed` - Average speed in metres per second
    /// * `drain_per_metre` - State-of-charge fraction consumed per metre travelled
    ///
    /// # Errors
    ///
    /// [`ConfigError::OutOfRange`] unless `nominal_speed` is positive and
    /// `drain_per_metre` is non-negative.
    pub fn new(
        graph: Arc<NavGraph>,
        nominal_speed: f64,
        drain_per_metre: f64,
    ) -> Result<Self, ConfigError> {
        ConfigError::positive("nominal_speed", nominal_speed)?;
        ConfigError::at_least("drain_per_metre", drain_per_metre, 0.0)?;
        Ok(Self {
            distances: CacheManagerMap::new(Arc::new(ShortestPathFactory::new(graph))),
            nominal_speed,
            drain_per_metre,
        })
    }

    /// Lane distance from `from` to `to`, if `to` is reachable.
    pub fn distance(&self, from: WaypointId, to: WaypointId) -> Option<f64> {
        *self.distances.get(to).get().get(&from)
    }
}

impl TravelModel for TravelEstimator {
    fn estimate(&self, from: WaypointId, to: WaypointId) -> Option<TravelEstimate> {
        let distance = self.distance(from, to)?;
        Some(TravelEstimate {
            duration: seconds(distance / self.nominal_speed),
            battery_drain: distance * self.drain_per_metre,
        })
    }
}
