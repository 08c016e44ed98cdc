//! Station network construction.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::error::NetworkError;
use super::feature::{Feature, FeatureCollection};
use super::properties::{Field, Properties};
use crate::domain::{LineGroups, Station, StationId};

/// Deduplicated stations and their line groupings.
///
/// Built once per dataset and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StationNetwork {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    lines: LineGroups,
}

impl StationNetwork {
    /// Look up a station by id.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.index.get(id).map(|&slot| &self.stations[slot])
    }

    /// Whether a station with this id exists.
    pub fn contains(&self, id: &StationId) -> bool {
        self.index.contains_key(id)
    }

    /// All stations in first-seen order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Line groupings.
    pub fn lines(&self) -> &LineGroups {
        &self.lines
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Counters describing how a build went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Features examined.
    pub features_seen: usize,

    /// Features dropped for lacking a point or a name.
    pub features_skipped: usize,

    /// Repeat sightings of a station at different coordinates.
    /// The first coordinates are always kept.
    pub coordinate_conflicts: usize,
}

/// Incremental builder for a [`StationNetwork`].
///
/// Feed features in order with [`add_feature`](Self::add_feature); the first
/// sighting of a station fixes its name and coordinates, later sightings only
/// contribute lines.
#[derive(Debug, Default)]
pub struct StationNetworkBuilder {
    network: StationNetwork,
    report: BuildReport,
}

impl StationNetworkBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one feature.
    ///
    /// Returns the id the feature resolved to, or the reason it was skipped.
    /// A skip is not fatal; the builder stays usable.
    pub fn add_feature(&mut self, feature: &Feature) -> Result<StationId, NetworkError> {
        self.report.features_seen += 1;

        match self.ingest(feature) {
            Ok(id) => Ok(id),
            Err(e) => {
                self.report.features_skipped += 1;
                Err(e)
            }
        }
    }

    fn ingest(&mut self, feature: &Feature) -> Result<StationId, NetworkError> {
        let (lon, lat) = feature.point_coordinates().ok_or(NetworkError::NotAPoint)?;

        let props = feature
            .properties
            .as_ref()
            .map(Properties::from_map)
            .unwrap_or_default();

        let name = props.require_str(Field::Name)?;
        let lines = props.lines();
        let id = StationId::from_name(&name);

        let network = &mut self.network;
        let slot = match network.index.get(&id) {
            Some(&slot) => {
                let existing = &network.stations[slot];
                if existing.lat != lat || existing.lon != lon {
                    self.report.coordinate_conflicts += 1;
                    warn!(
                        station = %id,
                        kept_lat = existing.lat,
                        kept_lon = existing.lon,
                        ignored_lat = lat,
                        ignored_lon = lon,
                        "Duplicate station at different coordinates, keeping first"
                    );
                }
                slot
            }
            None => {
                network.stations.push(Station::new(name, lat, lon));
                let slot = network.stations.len() - 1;
                network.index.insert(id.clone(), slot);
                slot
            }
        };

        let station = &mut network.stations[slot];
        for line in &lines {
            station.add_line(line);
            network.lines.add(line, &id);
        }

        Ok(id)
    }

    /// Finish building.
    pub fn finish(self) -> (StationNetwork, BuildReport) {
        (self.network, self.report)
    }
}

/// Build a station network from a feature collection.
///
/// Fails with [`NetworkError::DataShape`] if the collection has no features.
/// Individual unusable features are skipped and counted in the report.
pub fn build_network(
    collection: &FeatureCollection,
) -> Result<(StationNetwork, BuildReport), NetworkError> {
    let features = match collection.features.as_deref() {
        Some(features) if !features.is_empty() => features,
        _ => return Err(NetworkError::DataShape),
    };

    let mut builder = StationNetworkBuilder::new();
    for feature in features {
        if let Err(e) = builder.add_feature(feature) {
            debug!(error = %e, "Skipping feature");
        }
    }

    let (network, report) = builder.finish();
    debug!(
        stations = network.len(),
        lines = network.lines().len(),
        skipped = report.features_skipped,
        "Station network built"
    );

    Ok((network, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_LINE;
    use serde_json::json;

    fn id(s: &str) -> StationId {
        StationId::from_name(s)
    }

    fn station_feature(name: &str, line: &str, lon: f64, lat: f64) -> Feature {
        Feature::point(lon, lat, json!({ "name": name, "line": line }))
    }

    #[test]
    fn empty_collection_is_data_shape_error() {
        let err = build_network(&FeatureCollection::new(vec![])).unwrap_err();
        assert_eq!(err, NetworkError::DataShape);

        let err = build_network(&FeatureCollection::default()).unwrap_err();
        assert_eq!(err, NetworkError::DataShape);
    }

    #[test]
    fn duplicates_merge_lines() {
        let collection = FeatureCollection::new(vec![
            station_feature("Majestic", "Purple", 77.5729, 12.9757),
            station_feature("Majestic Station", "Green", 77.5729, 12.9757),
        ]);

        let (network, report) = build_network(&collection).unwrap();
        assert_eq!(network.len(), 1);
        assert_eq!(report.features_seen, 2);
        assert_eq!(report.features_skipped, 0);

        let station = network.station(&id("majestic")).unwrap();
        assert_eq!(station.display_name, "Majestic");
        assert_eq!(station.lines, vec!["Purple", "Green"]);

        assert_eq!(network.lines().get("Purple").unwrap(), &[id("Majestic")]);
        assert_eq!(network.lines().get("Green").unwrap(), &[id("Majestic")]);
    }

    #[test]
    fn first_coordinates_win() {
        let collection = FeatureCollection::new(vec![
            station_feature("MG Road", "Purple", 77.6068, 12.9755),
            station_feature("mg road", "Purple", 77.6070, 12.9756),
        ]);

        let (network, report) = build_network(&collection).unwrap();
        let station = network.station(&id("MG Road")).unwrap();
        assert_eq!(station.lat, 12.9755);
        assert_eq!(station.lon, 77.6068);
        assert_eq!(station.display_name, "MG Road");
        assert_eq!(report.coordinate_conflicts, 1);
    }

    #[test]
    fn skips_non_points_and_nameless_features() {
        let line_string: Feature = serde_json::from_value(json!({
            "geometry": { "type": "LineString", "coordinates": [[77.0, 12.0], [77.1, 12.1]] },
            "properties": { "name": "Purple Line" }
        }))
        .unwrap();

        let collection = FeatureCollection::new(vec![
            line_string,
            Feature::point(77.6, 12.9, json!({ "line": "Purple" })),
            Feature::default(),
            station_feature("Trinity", "Purple", 77.6190, 12.9730),
        ]);

        let (network, report) = build_network(&collection).unwrap();
        assert_eq!(network.len(), 1);
        assert_eq!(report.features_seen, 4);
        assert_eq!(report.features_skipped, 3);
        assert!(network.contains(&id("Trinity")));
    }

    #[test]
    fn all_features_skipped_yields_empty_network() {
        let collection = FeatureCollection::new(vec![Feature::default()]);
        let (network, report) = build_network(&collection).unwrap();
        assert!(network.is_empty());
        assert!(network.lines().is_empty());
        assert_eq!(report.features_skipped, 1);
    }

    #[test]
    fn stations_without_line_go_on_default_line() {
        let collection = FeatureCollection::new(vec![Feature::point(
            77.6,
            12.9,
            json!({ "title": "Trinity" }),
        )]);

        let (network, _) = build_network(&collection).unwrap();
        assert_eq!(network.lines().get(DEFAULT_LINE).unwrap(), &[id("Trinity")]);
    }

    #[test]
    fn line_sequences_keep_first_seen_order() {
        let collection = FeatureCollection::new(vec![
            station_feature("A", "Purple", 77.0, 12.0),
            station_feature("B", "Purple, Green", 77.1, 12.0),
            station_feature("C", "Purple", 77.2, 12.0),
            station_feature("B", "Purple", 77.1, 12.0),
        ]);

        let (network, _) = build_network(&collection).unwrap();
        assert_eq!(
            network.lines().get("Purple").unwrap(),
            &[id("A"), id("B"), id("C")]
        );
        assert_eq!(network.lines().get("Green").unwrap(), &[id("B")]);

        let order: Vec<&str> = network.stations().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn builder_reports_skip_reason() {
        let mut builder = StationNetworkBuilder::new();
        assert_eq!(
            builder.add_feature(&Feature::default()),
            Err(NetworkError::NotAPoint)
        );
        assert_eq!(
            builder.add_feature(&station_feature("Trinity", "Purple", 77.6, 12.9)),
            Ok(id("Trinity"))
        );

        let (network, report) = builder.finish();
        assert_eq!(network.len(), 1);
        assert_eq!(report.features_skipped, 1);
    }
}
