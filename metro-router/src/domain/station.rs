//! Station identity and records.

use std::fmt;

use crate::geo;

/// Suffix dropped from names when deriving an id.
const STATION_SUFFIX: &str = " station";

/// Normalize a human-readable station name into its dedup key.
///
/// Trims, lowercases and removes a trailing `" station"`.
///
/// # Examples
///
/// ```
/// use metro_router::domain::normalize;
///
/// assert_eq!(normalize("MG Road Station"), "mg road");
/// assert_eq!(normalize("  Majestic "), "majestic");
/// ```
pub fn normalize(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_suffix(STATION_SUFFIX) {
        Some(stripped) => stripped.trim_end().to_string(),
        None => lowered,
    }
}

/// Normalized station key.
///
/// Two names that normalize to the same string are the same stop. The
/// wrapped string is always the output of [`normalize`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Derive the id for a station name.
    pub fn from_name(name: &str) -> Self {
        Self(normalize(name))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A deduplicated stop with its coordinates and line memberships.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,

    /// Name as first seen in the source data.
    pub display_name: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Line labels in first-seen order, no duplicates.
    pub lines: Vec<String>,
}

impl Station {
    /// Create a station with no line memberships.
    pub fn new(display_name: impl Into<String>, lat: f64, lon: f64) -> Self {
        let display_name = display_name.into();
        Self {
            id: StationId::from_name(&display_name),
            display_name,
            lat,
            lon,
            lines: Vec::new(),
        }
    }

    /// Record membership of a line. Returns `false` if already a member.
    pub fn add_line(&mut self, line: &str) -> bool {
        if self.serves(line) {
            return false;
        }
        self.lines.push(line.to_string());
        true
    }

    /// Whether the station is on the given line.
    pub fn serves(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Great-circle distance to another station in kilometres.
    pub fn distance_to(&self, other: &Station) -> f64 {
        geo::distance_km(self.lat, self.lon, other.lat, other.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_and_suffix_insensitive() {
        assert_eq!(normalize("MG Road Station"), normalize("mg road"));
        assert_eq!(normalize("Indiranagar STATION"), "indiranagar");
    }

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize("  Cubbon Park  "), "cubbon park");
        assert_eq!(normalize(" Cubbon Park station "), "cubbon park");
    }

    #[test]
    fn normalize_only_strips_trailing_suffix() {
        assert_eq!(normalize("Station Road"), "station road");
        assert_eq!(normalize("Station"), "station");
    }

    #[test]
    fn id_display_and_debug() {
        let id = StationId::from_name("Majestic");
        assert_eq!(id.to_string(), "majestic");
        assert_eq!(format!("{:?}", id), "StationId(majestic)");
    }

    #[test]
    fn add_line_is_idempotent() {
        let mut s = Station::new("Majestic", 12.9757, 77.5729);
        assert!(s.add_line("Purple"));
        assert!(s.add_line("Green"));
        assert!(!s.add_line("Purple"));
        assert_eq!(s.lines, vec!["Purple", "Green"]);
        assert!(s.serves("Green"));
        assert!(!s.serves("Yellow"));
    }

    #[test]
    fn new_derives_id_from_name() {
        let s = Station::new("MG Road Station", 12.9755, 77.6068);
        assert_eq!(s.id.as_str(), "mg road");
        assert_eq!(s.display_name, "MG Road Station");
    }
}
