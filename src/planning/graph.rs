//! Directed lane graph over the fleet's waypoints.

use petgraph::graph::{DiGraph, NodeIndex};

use super::error::PlanningError;
use crate::WaypointId;

/// A named location robots can stand on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    name: String,
    x: f64,
    y: f64,
    charger: bool,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            charger: false,
        }
    }

    /// Marks this waypoint as a charging station.
    pub fn with_charger(mut self) -> Self {
        self.charger = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn is_charger(&self) -> bool {
        self.charger
    }

    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Waypoints connected by directed lanes weighted with their length in metres.
///
/// Waypoint ids are the graph's node indices; waypoints are never removed, so
/// ids stay stable for the lifetime of the graph.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    graph: DiGraph<Waypoint, f64>,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_waypoint(&mut self, waypoint: Waypoint) -> Result<WaypointId, PlanningError> {
        if self.find_waypoint(waypoint.name()).is_some() {
            return Err(PlanningError::DuplicateName(waypoint.name));
        }
        Ok(self.graph.add_node(waypoint).index())
    }

    /// Adds a lane from `from` to `to` whose length is the straight-line
    /// distance between them.
    pub fn add_lane(&mut self, from: WaypointId, to: WaypointId) -> Result<(), PlanningError> {
        let length = self.waypoint_or_err(from)?.distance_to(self.waypoint_or_err(to)?);
        self.graph
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), length);
        Ok(())
    }

    pub fn add_bidirectional_lane(
        &mut self,
        a: WaypointId,
        b: WaypointId,
    ) -> Result<(), PlanningError> {
        self.add_lane(a, b)?;
        self.add_lane(b, a)
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    pub fn find_waypoint(&self, name: &str) -> Option<WaypointId> {
        self.graph
            .node_indices()
            .find(|&n| self.graph[n].name() == name)
            .map(|n| n.index())
    }

    pub fn charging_waypoints(&self) -> Vec<WaypointId> {
        self.graph
            .node_indices()
            .filter(|&n| self.graph[n].is_charger())
            .map(|n| n.index())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn lane_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn inner(&self) -> &DiGraph<Waypoint, f64> {
        &self.graph
    }

    fn waypoint_or_err(&self, id: WaypointId) -> Result<&Waypoint, PlanningError> {
        self.waypoint(id).ok_or(PlanningError::UnknownWaypoint(id))
    }
}
