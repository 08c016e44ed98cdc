//! Free-text station lookup.

use tracing::debug;

use super::similarity::similarity;
use crate::domain::Station;
use crate::network::StationNetwork;

/// Minimum similarity for a fuzzy suggestion.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// Maximum number of fuzzy suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// How the candidates in a [`MatchResult`] were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// The query appears in the station name.
    Substring,
    /// Nothing contained the query; these names look similar to it.
    Similarity,
}

/// Outcome of resolving a query.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'a> {
    /// The query was empty: the user wants to stop.
    Cancelled,

    /// Nothing matched, not even approximately.
    NoMatch,

    /// One or more stations matched.
    Candidates {
        stations: Vec<&'a Station>,
        source: MatchSource,
    },
}

impl<'a> MatchResult<'a> {
    /// Matched stations, empty for `Cancelled` and `NoMatch`.
    pub fn candidates(&self) -> &[&'a Station] {
        match self {
            MatchResult::Candidates { stations, .. } => stations.as_slice(),
            _ => &[],
        }
    }

    /// The station to pick without asking, if there is exactly one candidate.
    pub fn single(&self) -> Option<&'a Station> {
        match self.candidates() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Resolves typed station names against a network.
///
/// Substring hits always win over similarity suggestions; similarity is only
/// consulted when no name contains the query.
#[derive(Debug, Clone, Copy)]
pub struct StationResolver<'a> {
    network: &'a StationNetwork,
    cutoff: f64,
    max_suggestions: usize,
}

impl<'a> StationResolver<'a> {
    /// Create a resolver with the default cutoff and suggestion count.
    pub fn new(network: &'a StationNetwork) -> Self {
        Self {
            network,
            cutoff: DEFAULT_CUTOFF,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Set the minimum similarity for suggestions (inclusive).
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set the maximum number of suggestions.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Resolve a query to zero, one or many stations.
    pub fn resolve(&self, query: &str) -> MatchResult<'a> {
        let query = query.trim();
        if query.is_empty() {
            return MatchResult::Cancelled;
        }

        let needle = query.to_lowercase();
        let contained: Vec<&'a Station> = self
            .network
            .stations()
            .filter(|s| s.display_name.to_lowercase().contains(&needle))
            .collect();

        if !contained.is_empty() {
            debug!(query, matches = contained.len(), "Substring match");
            return MatchResult::Candidates {
                stations: contained,
                source: MatchSource::Substring,
            };
        }

        let suggestions = self.suggest(query);
        if suggestions.is_empty() {
            debug!(query, "No match");
            return MatchResult::NoMatch;
        }

        debug!(query, suggestions = suggestions.len(), "Similarity match");
        MatchResult::Candidates {
            stations: suggestions,
            source: MatchSource::Similarity,
        }
    }

    /// Best-scoring stations at or above the cutoff, best first.
    ///
    /// Equal scores are ordered by display name, descending.
    fn suggest(&self, query: &str) -> Vec<&'a Station> {
        let mut scored: Vec<(f64, &'a Station)> = self
            .network
            .stations()
            .map(|s| (similarity(&s.display_name, query), s))
            .filter(|(score, _)| *score >= self.cutoff)
            .collect();

        scored.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| b.1.display_name.cmp(&a.1.display_name))
        });

        scored
            .into_iter()
            .take(self.max_suggestions)
            .map(|(_, s)| s)
            .collect()
    }
}

/// Resolve a query with default settings.
pub fn resolve<'a>(query: &str, network: &'a StationNetwork) -> MatchResult<'a> {
    StationResolver::new(network).resolve(query)
}
