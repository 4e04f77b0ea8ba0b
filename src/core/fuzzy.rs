// src/core/fuzzy.rs

use strsim::jaro_winkler;

/// Finds the single closest candidate to `input` by Jaro-Winkler similarity.
/// Returns `None` when no candidate clears `threshold`.
pub fn closest_match<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> Option<&'a str> {
    let mut best: Option<(f64, &str)> = None;
    for candidate in candidates {
        let score = jaro_winkler(input, candidate);
        if score >= threshold && best.is_none_or(|(top, _)| score > top) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}
