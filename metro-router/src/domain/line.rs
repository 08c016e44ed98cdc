//! Line membership.

use std::collections::HashMap;

use super::StationId;

/// Label given to stations whose record names no line.
pub const DEFAULT_LINE: &str = "Metro";

/// Stations grouped by line.
///
/// Lines are kept in first-seen order and each line's stations in
/// first-seen order with no repeats, so iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct LineGroups {
    lines: Vec<(String, Vec<StationId>)>,
    index: HashMap<String, usize>,
}

impl LineGroups {
    /// Create an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a station to a line, creating the line if needed.
    ///
    /// Returns `false` if the station was already on the line.
    pub fn add(&mut self, line: &str, station: &StationId) -> bool {
        let slot = match self.index.get(line) {
            Some(&slot) => slot,
            None => {
                self.lines.push((line.to_string(), Vec::new()));
                let slot = self.lines.len() - 1;
                self.index.insert(line.to_string(), slot);
                slot
            }
        };

        let members = &mut self.lines[slot].1;
        if members.contains(station) {
            return false;
        }
        members.push(station.clone());
        true
    }

    /// Stations on a line, in first-seen order.
    pub fn get(&self, line: &str) -> Option<&[StationId]> {
        self.index
            .get(line)
            .map(|&slot| self.lines[slot].1.as_slice())
    }

    /// Iterate over `(line, stations)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[StationId])> {
        self.lines
            .iter()
            .map(|(line, members)| (line.as_str(), members.as_slice()))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no line has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
