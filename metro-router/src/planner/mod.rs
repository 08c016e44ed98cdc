//! Route planning over the proximity graph.
//!
//! Answers "what is the fastest way from A to B?" with Dijkstra's algorithm.
//! An unreachable destination is an ordinary outcome, not a failure of the
//! planner.

mod search;

pub use search::{Planner, Route, RouteError, shortest_path};
