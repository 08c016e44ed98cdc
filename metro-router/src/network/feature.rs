//! GeoJSON transport records.
//!
//! Only the parts of GeoJSON the network builder reads are modelled. Anything
//! else in the document is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeatureCollection {
    /// `None` when the document has no `features` key at all.
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
}

impl FeatureCollection {
    /// Wrap a list of features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features: Some(features),
        }
    }

    /// Number of features, zero if the list is absent.
    pub fn len(&self) -> usize {
        self.features.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if there are no features.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,

    /// Free-form property bag; key case varies between sources.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Build a point feature from `[lon, lat]` and a JSON object of properties.
    ///
    /// Non-object `properties` values are dropped.
    pub fn point(lon: f64, lat: f64, properties: Value) -> Self {
        let properties = match properties {
            Value::Object(map) => Some(map),
            _ => None,
        };
        Self {
            geometry: Some(Geometry {
                kind: "Point".to_string(),
                coordinates: Value::from(vec![lon, lat]),
            }),
            properties,
        }
    }

    /// The `(lon, lat)` of this feature if its geometry is a point.
    pub fn point_coordinates(&self) -> Option<(f64, f64)> {
        self.geometry.as_ref()?.point()
    }
}

/// A GeoJSON geometry.
///
/// Coordinates are kept as raw JSON because their nesting depends on the
/// geometry type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// `(lon, lat)` for a `Point` with at least two numeric coordinates.
    pub fn point(&self) -> Option<(f64, f64)> {
        if self.kind != "Point" {
            return None;
        }
        let coords = self.coordinates.as_array()?;
        let lon = coords.first()?.as_f64()?;
        let lat = coords.get(1)?.as_f64()?;
        Some((lon, lat))
    }
}
