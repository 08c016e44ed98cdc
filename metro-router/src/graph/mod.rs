//! Weighted graph synthesis.
//!
//! Connects stations to their nearest same-line neighbors and weights each
//! hop by estimated travel time.

mod config;
mod proximity;

pub use config::{AVG_SPEED_VAR, ConfigError, DWELL_VAR, GraphConfig, NEIGHBORS_VAR};
pub use proximity::{Edge, Graph, build_graph};
