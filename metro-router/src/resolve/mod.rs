//! Station name resolution.
//!
//! Maps what a user typed ("mg rd", "Indranagar") to stations in the
//! network: substring hits first, then similarity suggestions for typos.

mod resolver;
pub mod selection;
mod similarity;

pub use resolver::{
    DEFAULT_CUTOFF, DEFAULT_MAX_SUGGESTIONS, MatchResult, MatchSource, StationResolver, resolve,
};
pub use selection::{MAX_LISTED, Selection, menu, parse_selection};
pub use similarity::similarity;
