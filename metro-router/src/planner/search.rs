//! Minimum-time route search.
//!
//! Dijkstra over the proximity graph. Edge costs are non-negative (ride time
//! plus dwell) so the first time the goal is popped its cost is optimal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::StationId;
use crate::graph::Graph;
use crate::network::StationNetwork;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A supplied station id is not in the network
    #[error("no such station: {0}")]
    NoSuchStation(StationId),

    /// The goal cannot be reached from the start
    #[error("no route from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },
}

/// A minimum-time path between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Stations from origin to destination, both included.
    pub stations: Vec<StationId>,

    /// Sum of edge costs along the path, in seconds.
    pub total_seconds: f64,
}

impl Route {
    /// Number of hops taken.
    pub fn hop_count(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&StationId> {
        self.stations.first()
    }

    pub fn destination(&self) -> Option<&StationId> {
        self.stations.last()
    }
}

/// Frontier entry, ordered so the cheapest pops first from a max-heap.
#[derive(Debug, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    station: StationId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the cheapest path from `start` to `goal`.
///
/// Does not check that either id exists; an unknown start simply has no
/// outgoing edges. Use [`Planner`] for validated lookups.
///
/// Among equal-cost paths the one returned is deterministic for a given
/// graph but otherwise unspecified.
pub fn shortest_path(
    graph: &Graph,
    start: &StationId,
    goal: &StationId,
) -> Result<Route, RouteError> {
    let mut best: HashMap<&StationId, f64> = HashMap::new();
    let mut previous: HashMap<&StationId, &StationId> = HashMap::new();
    let mut visited: HashSet<&StationId> = HashSet::new();
    let mut frontier = BinaryHeap::new();

    best.insert(start, 0.0);
    frontier.push(Frontier {
        cost: 0.0,
        station: start.clone(),
    });

    while let Some(Frontier { cost, station }) = frontier.pop() {
        if &station == goal {
            let stations = reconstruct(&previous, start, goal);
            debug!(
                from = %start,
                to = %goal,
                hops = stations.len() - 1,
                cost,
                expanded = visited.len(),
                "Route found"
            );
            return Ok(Route {
                stations,
                total_seconds: cost,
            });
        }

        // Edges borrow ids from the graph so the maps can hold references.
        let edges = graph.edges_from(&station);
        let Some(current) = edges.first().map(|e| &e.from) else {
            continue;
        };
        if !visited.insert(current) {
            continue;
        }
        trace!(station = %current, cost, "Expanding");

        for edge in edges {
            let next_cost = cost + edge.cost_seconds;
            let improves = best.get(&edge.to).is_none_or(|&known| next_cost < known);
            if improves {
                best.insert(&edge.to, next_cost);
                previous.insert(&edge.to, current);
                frontier.push(Frontier {
                    cost: next_cost,
                    station: edge.to.clone(),
                });
            }
        }
    }

    debug!(from = %start, to = %goal, expanded = visited.len(), "No route");
    Err(RouteError::NoRoute {
        from: start.clone(),
        to: goal.clone(),
    })
}

/// Walk predecessors back from `goal` to `start`.
fn reconstruct(
    previous: &HashMap<&StationId, &StationId>,
    start: &StationId,
    goal: &StationId,
) -> Vec<StationId> {
    let mut path = vec![goal.clone()];
    let mut cursor = goal;
    while cursor != start {
        match previous.get(cursor) {
            Some(&prev) => {
                path.push(prev.clone());
                cursor = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Route planner over a fixed network and its graph.
pub struct Planner<'a> {
    network: &'a StationNetwork,
    graph: &'a Graph,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a StationNetwork, graph: &'a Graph) -> Self {
        Self { network, graph }
    }

    /// Plan the fastest route between two stations.
    ///
    /// Both ids are checked against the network before searching.
    pub fn plan(&self, from: &StationId, to: &StationId) -> Result<Route, RouteError> {
        for id in [from, to] {
            if !self.network.contains(id) {
                return Err(RouteError::NoSuchStation(id.clone()));
            }
        }
        shortest_path(self.graph, from, to)
    }
}
