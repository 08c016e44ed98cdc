//! Choosing among several candidate stations.
//!
//! When a query matches more than one station the user is shown a numbered
//! menu and types a number. These helpers build the menu and interpret the
//! reply; reading input is left to the caller.

use crate::domain::Station;

/// At most this many candidates are listed.
pub const MAX_LISTED: usize = 10;

/// The user's reply to a candidate menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the candidate list.
    Chosen(usize),
    /// Not a listed number; search again.
    Retry,
}

/// Number of candidates that will be listed.
pub fn listed_count(candidates: usize) -> usize {
    candidates.min(MAX_LISTED)
}

/// Menu lines for a candidate list: `" 1. Majestic (Purple, Green)"`.
pub fn menu(candidates: &[&Station]) -> Vec<String> {
    candidates
        .iter()
        .take(MAX_LISTED)
        .enumerate()
        .map(|(i, s)| format!(" {}. {} ({})", i + 1, s.display_name, s.lines.join(", ")))
        .collect()
}

/// Interpret a reply against a menu of `candidates` entries.
///
/// Accepts a 1-based number among the listed entries; anything else,
/// including an empty reply, asks for a new search.
pub fn parse_selection(input: &str, candidates: usize) -> Selection {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Selection::Retry;
    }

    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= listed_count(candidates) => Selection::Chosen(n - 1),
        _ => Selection::Retry,
    }
}
