//! Route summaries for display.
//!
//! Turns a [`Route`] of station ids back into stations and adds the figures a
//! rider cares about: distance covered, travel time and arrival time.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::domain::Station;
use crate::network::StationNetwork;
use crate::planner::{Route, RouteError};

/// A planned route resolved to stations.
#[derive(Debug, Clone)]
pub struct RouteSummary<'a> {
    /// Stations from origin to destination.
    pub stations: Vec<&'a Station>,

    /// Great-circle distance summed hop by hop, in kilometres.
    pub total_distance_km: f64,

    /// Estimated travel time in seconds.
    pub total_seconds: f64,

    /// Estimated arrival given the departure time passed in.
    ///
    /// `None` when the travel time is too large to land on a calendar date.
    pub arrival: Option<NaiveDateTime>,
}

impl<'a> RouteSummary<'a> {
    /// Summarize a route leaving at `departure`.
    ///
    /// Fails if the route names a station the network does not have.
    pub fn new(
        route: &Route,
        network: &'a StationNetwork,
        departure: NaiveDateTime,
    ) -> Result<Self, RouteError> {
        let stations = route
            .stations
            .iter()
            .map(|id| {
                network
                    .station(id)
                    .ok_or_else(|| RouteError::NoSuchStation(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_distance_km = stations
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum();

        let arrival = arrival_after(departure, route.total_seconds);

        Ok(Self {
            stations,
            total_distance_km,
            total_seconds: route.total_seconds,
            arrival,
        })
    }

    /// Whole minutes and remaining whole seconds of travel time.
    pub fn minutes_and_seconds(&self) -> (u64, u64) {
        let secs = self.total_seconds.max(0.0) as u64;
        (secs / 60, secs % 60)
    }
}

impl fmt::Display for RouteSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Route Found:")?;
        for (i, station) in self.stations.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} [{}]",
                i + 1,
                station.display_name,
                station.lines.join(",")
            )?;
        }

        let (mins, secs) = self.minutes_and_seconds();
        writeln!(f)?;
        writeln!(f, "Summary:")?;
        writeln!(f, "  Total Distance: {:.2} km", self.total_distance_km)?;
        writeln!(f, "  Est. Time:      {mins} min {secs} sec")?;
        match self.arrival {
            Some(arrival) => write!(f, "  Arrival:        {}", arrival.format("%H:%M:%S")),
            None => write!(f, "  Arrival:        --:--:--"),
        }
    }
}

/// `departure` plus `seconds`, if the result is representable.
fn arrival_after(departure: NaiveDateTime, seconds: f64) -> Option<NaiveDateTime> {
    // The cast saturates; anything past the calendar fails the checked add.
    let millis = (seconds * 1000.0).round() as i64;
    let travel = Duration::try_milliseconds(millis)?;
    departure.checked_add_signed(travel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::graph::{GraphConfig, build_graph};
    use crate::network::{Feature, FeatureCollection, build_network};
    use crate::planner::Planner;
    use chrono::NaiveDate;
    use serde_json::json;

    fn departure() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn id(s: &str) -> StationId {
        StationId::from_name(s)
    }

    fn network() -> StationNetwork {
        let collection = FeatureCollection::new(vec![
            Feature::point(0.0, 0.0, json!({ "name": "A", "line": "Purple" })),
            Feature::point(0.1, 0.0, json!({ "name": "B", "line": "Purple, Green" })),
            Feature::point(0.2, 0.0, json!({ "name": "C", "line": "Purple" })),
        ]);
        build_network(&collection).unwrap().0
    }

    #[test]
    fn summary_adds_up_hops() {
        let net = network();
        let route = Route {
            stations: vec![id("A"), id("B"), id("C")],
            total_seconds: 1234.0,
        };

        let summary = RouteSummary::new(&route, &net, departure()).unwrap();
        assert_eq!(summary.stations.len(), 3);
        assert!((summary.total_distance_km - 22.24).abs() < 0.01);
        assert_eq!(summary.minutes_and_seconds(), (20, 34));
        let arrival = summary.arrival.unwrap();
        assert_eq!(arrival.format("%H:%M:%S").to_string(), "09:20:34");
    }

    #[test]
    fn unknown_station_in_route() {
        let net = network();
        let route = Route {
            stations: vec![id("A"), id("Z")],
            total_seconds: 10.0,
        };

        let err = RouteSummary::new(&route, &net, departure()).unwrap_err();
        assert_eq!(err, RouteError::NoSuchStation(id("Z")));
    }

    #[test]
    fn display_lists_stations_and_totals() {
        let net = network();
        let route = Route {
            stations: vec![id("A"), id("B")],
            total_seconds: 90.0,
        };

        let text = RouteSummary::new(&route, &net, departure())
            .unwrap()
            .to_string();
        assert!(text.contains("  1. A [Purple]"));
        assert!(text.contains("  2. B [Purple,Green]"));
        assert!(text.contains("Total Distance: 11.12 km"));
        assert!(text.contains("Est. Time:      1 min 30 sec"));
        assert!(text.contains("Arrival:        09:01:30"));
    }

    #[test]
    fn planned_route_summarizes() {
        let net = network();
        let graph = build_graph(&net, &GraphConfig::default());
        let route = Planner::new(&net, &graph).plan(&id("A"), &id("C")).unwrap();

        let summary = RouteSummary::new(&route, &net, departure()).unwrap();
        assert_eq!(summary.stations.first().unwrap().display_name, "A");
        assert_eq!(summary.stations.last().unwrap().display_name, "C");
        assert!(summary.arrival.unwrap() > departure());
    }

    #[test]
    fn crawling_speed_has_no_arrival() {
        let net = network();
        let config = GraphConfig::new(1e-9, 30.0, 1).unwrap();
        let graph = build_graph(&net, &config);
        let route = Planner::new(&net, &graph).plan(&id("A"), &id("B")).unwrap();
        assert!(route.total_seconds > 1e13);

        let summary = RouteSummary::new(&route, &net, departure()).unwrap();
        assert_eq!(summary.arrival, None);
        assert!(summary.to_string().contains("Arrival:        --:--:--"));
    }

    #[test]
    fn arrival_after_bounds() {
        assert_eq!(
            arrival_after(departure(), 61.4),
            departure().checked_add_signed(Duration::milliseconds(61_400))
        );
        assert_eq!(arrival_after(departure(), 1e13), None);
        assert_eq!(arrival_after(departure(), f64::MAX), None);
    }
}
