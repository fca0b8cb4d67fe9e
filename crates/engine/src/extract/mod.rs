//! Heuristic signal extraction from free-text agent output.
//!
//! Every extractor is total: it accepts absent or empty text and always
//! returns a value from its fixed set. Matching is case-insensitive
//! substring search over fixed keyword tables holding the Spanish vocabulary
//! the agents write in and its English equivalent. Thresholds are part of
//! the report contract and must not be tuned.

mod growth;
mod recommendations;
mod risk;

pub use growth::extract_growth_potential;
pub use recommendations::{extract_recommendations, CANNED_RECOMMENDATIONS, MAX_RECOMMENDATIONS};
pub use risk::extract_risk_level;

/// Lowercased text, or None when there is nothing to scan.
fn lowered(text: Option<&str>) -> Option<String> {
    match text {
        Some(t) if !t.trim().is_empty() => Some(t.to_lowercase()),
        _ => None,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn count_occurrences(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().map(|n| haystack.matches(n).count()).sum()
}
