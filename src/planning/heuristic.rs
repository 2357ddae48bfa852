//! Shortest lane distance to a goal waypoint, generated into the cache.

use std::sync::Arc;

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::{EdgeRef, Reversed};

use super::graph::NavGraph;
use crate::cache::{Factory, Generator, Storage};
use crate::WaypointId;

/// Distance from any waypoint to one goal waypoint; `None` when unreachable.
///
/// A single search over the reversed lane graph settles every waypoint that
/// can reach the goal, so the first miss stages all of them and later
/// lookups for the same goal are pure cache hits.
#[derive(Debug, Clone)]
pub struct ShortestPathGenerator {
    graph: Arc<NavGraph>,
    goal: WaypointId,
}

impl ShortestPathGenerator {
    pub fn new(graph: Arc<NavGraph>, goal: WaypointId) -> Self {
        Self { graph, goal }
    }

    pub fn goal(&self) -> WaypointId {
        self.goal
    }
}

impl Generator for ShortestPathGenerator {
    type Key = WaypointId;
    type Value = Option<f64>;

    fn generate(
        &self,
        key: &WaypointId,
        old_items: &Storage<WaypointId, Option<f64>>,
        new_items: &mut Storage<WaypointId, Option<f64>>,
    ) -> Arc<Option<f64>> {
        if self.graph.waypoint(self.goal).is_none() {
            return Arc::new(None);
        }

        let distances = dijkstra(
            Reversed(self.graph.inner()),
            NodeIndex::new(self.goal),
            None,
            |lane| *lane.weight(),
        );

        for (node, distance) in distances {
            let waypoint = node.index();
            if !old_items.contains_key(&waypoint) {
                new_items
                    .entry(waypoint)
                    .or_insert_with(|| Arc::new(Some(distance)));
            }
        }

        new_items
            .get(key)
            .cloned()
            .unwrap_or_else(|| Arc::new(None))
    }
}

/// Builds a [`ShortestPathGenerator`] for each goal waypoint.
#[derive(Debug, Clone)]
pub struct ShortestPathFactory {
    graph: Arc<NavGraph>,
}

impl ShortestPathFactory {
    pub fn new(graph: Arc<NavGraph>) -> Self {
        Self { graph }
    }
}

impl Factory for ShortestPathFactory {
    type Generator = ShortestPathGenerator;

    fn make(&self, goal: usize) -> Arc<ShortestPathGenerator> {
        Arc::new(ShortestPathGenerator::new(Arc::clone(&self.graph), goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheManager, CacheManagerMap};
    use crate::planning::Waypoint;

    /// a(0,0) -> b(10,0) -> c(10,10), plus an isolated waypoint d.
    fn corridor() -> Arc<NavGraph> {
        let mut graph = NavGraph::new();
        let a = graph.add_waypoint(Waypoint::new("a", 0.0, 0.0)).unwrap();
        let b = graph.add_waypoint(Waypoint::new("b", 10.0, 0.0)).unwrap();
        let c = graph.add_waypoint(Waypoint::new("c", 10.0, 10.0)).unwrap();
        graph.add_waypoint(Waypoint::new("d", 50.0, 50.0)).unwrap();
        graph.add_lane(a, b).unwrap();
        graph.add_lane(b, c).unwrap();
        Arc::new(graph)
    }

    #[test]
    fn distances_follow_lane_direction() {
        let manager = CacheManager::new(Arc::new(ShortestPathGenerator::new(corridor(), 2)));
        let mut cache = manager.get();

        assert_eq!(*cache.get(&0), Some(20.0));
        assert_eq!(*cache.get(&1), Some(10.0));
        assert_eq!(*cache.get(&2), Some(0.0));
        assert_eq!(*cache.get(&3), None);
    }

    #[test]
    fn first_miss_stages_every_reachable_waypoint() {
        let manager = CacheManager::new(Arc::new(ShortestPathGenerator::new(corridor(), 2)));
        {
            let mut cache = manager.get();
            cache.get(&0);
            assert_eq!(cache.pending(), 3);
        }
        assert_eq!(manager.snapshot_len(), 3);
    }

    #[test]
    fn lanes_are_one_way() {
        let manager = CacheManager::new(Arc::new(ShortestPathGenerator::new(corridor(), 0)));
        let mut cache = manager.get();
        assert_eq!(*cache.get(&2), None);
        assert_eq!(*cache.get(&0), Some(0.0));
    }

    #[test]
    fn unknown_goal_is_unreachable() {
        let manager = CacheManager::new(Arc::new(ShortestPathGenerator::new(corridor(), 42)));
        assert_eq!(*manager.get().get(&0), None);
    }

    #[test]
    fn factory_serves_each_goal() {
        let map = CacheManagerMap::new(Arc::new(ShortestPathFactory::new(corridor())));
        assert_eq!(*map.get(1).get().get(&0), Some(10.0));
        assert_eq!(*map.get(2).get().get(&0), Some(20.0));
        assert_eq!(map.len(), 2);
    }
}
