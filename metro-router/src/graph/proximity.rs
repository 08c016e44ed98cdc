//! Nearest-neighbor graph over same-line stations.
//!
//! The source data carries stations but not the track between them, so each
//! station is linked to its `k` closest neighbors on every line it serves.
//! The result is directed (A's nearest need not include B's) and may hold
//! parallel edges between a pair when they share more than one line.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::config::GraphConfig;
use crate::domain::StationId;
use crate::network::StationNetwork;

/// A directed hop between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: StationId,
    pub to: StationId,

    /// Line that induced this edge.
    pub line: String,

    /// Ride time plus dwell, in seconds.
    pub cost_seconds: f64,

    pub distance_km: f64,
}

/// Directed multigraph keyed by source station.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<StationId, Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge. Existing edges between the same pair are kept.
    pub fn add_edge(&mut self, edge: Edge) {
        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge);
        self.edge_count += 1;
    }

    /// Outgoing edges of a station, in insertion order.
    pub fn edges_from(&self, id: &StationId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stations with at least one outgoing edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }
}

/// Build the proximity graph for a network.
///
/// For each line with at least two stations, every station gets an edge to
/// each of its `k_neighbors` nearest stations on that line. Ties in distance
/// keep the line's station order. Lines with a single station add nothing.
pub fn build_graph(network: &StationNetwork, config: &GraphConfig) -> Graph {
    let mut graph = Graph::new();

    for (line, members) in network.lines().iter() {
        if members.len() < 2 {
            trace!(line, "Skipping line with fewer than two stations");
            continue;
        }

        for from_id in members {
            let Some(from) = network.station(from_id) else {
                continue;
            };

            let mut candidates: Vec<(f64, &StationId)> = members
                .iter()
                .filter(|to_id| *to_id != from_id)
                .filter_map(|to_id| {
                    let to = network.station(to_id)?;
                    Some((from.distance_to(to), to_id))
                })
                .collect();

            // Stable, so equal distances keep line order.
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

            for (distance_km, to_id) in candidates.into_iter().take(config.k_neighbors) {
                graph.add_edge(Edge {
                    from: from_id.clone(),
                    to: to_id.clone(),
                    line: line.to_string(),
                    cost_seconds: config.edge_cost(distance_km),
                    distance_km,
                });
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        k = config.k_neighbors,
        "Proximity graph built"
    );

    graph
}
