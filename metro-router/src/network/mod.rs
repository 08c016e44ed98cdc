//! Station network construction from GeoJSON features.
//!
//! Features from different sources name the same things differently, repeat
//! stations once per line, and mix in non-point geometry. This module
//! normalizes all of that into one [`Station`](crate::domain::Station) per
//! stop plus per-line station sequences.

mod builder;
mod error;
mod feature;
mod properties;

pub use builder::{BuildReport, StationNetwork, StationNetworkBuilder, build_network};
pub use error::NetworkError;
pub use feature::{Feature, FeatureCollection, Geometry};
pub use properties::{Field, LINE_KEYS, NAME_KEYS, Properties};
