//! Domain types for the metro network.
//!
//! Stations are keyed by a normalized id and grouped by the lines that
//! serve them. Both are built once per dataset and not modified afterwards.

mod line;
mod station;

pub use line::{DEFAULT_LINE, LineGroups};
pub use station::{Station, StationId, normalize};
