//! Fuzzy "did you mean" candidates for unknown names

/// Minimum Jaro-Winkler similarity for a name to be suggested
const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Maximum number of suggestions to surface
const MAX_SUGGESTIONS: usize = 3;

/// Rank `candidates` by similarity to `target`, best first
pub fn similar_names<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut scored: Vec<(String, f64)> = candidates
        .into_iter()
        .map(|candidate| (candidate.to_string(), strsim::jaro_winkler(target, candidate)))
        .filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(candidate, _)| candidate)
        .collect()
}
