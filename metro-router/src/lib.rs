//! Metro route estimator.
//!
//! Turns a GeoJSON collection of station points into a routable network and
//! answers: "what is the fastest way from this station to that one?"
//! Station names typed by a user may be partial or misspelled.

pub mod dataset;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod network;
pub mod planner;
pub mod report;
pub mod resolve;
