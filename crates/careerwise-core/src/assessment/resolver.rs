//! Turning a completed [`ScoreMap`] into a ranking.
//!
//! Ranking is a stable sort by descending score over the map's canonical
//! order, so equal scores always resolve to the category defined first.

use super::scoring::ScoreMap;
use super::types::{CategoryId, Dichotomy};
use crate::error::ScoringError;

/// All categories with their scores, highest first, ties in canonical order.
pub fn rank(scores: &ScoreMap) -> Vec<(CategoryId, u32)> {
    let mut ranked: Vec<(CategoryId, u32)> =
        scores.iter().map(|(id, score)| (id.clone(), score)).collect();
    // sort_by is stable: equal scores keep their canonical order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// The highest-scoring category. `None` only for an empty map.
pub fn resolve_top(scores: &ScoreMap) -> Option<CategoryId> {
    let mut best: Option<(&CategoryId, u32)> = None;
    for (id, score) in scores.iter() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((id, score)),
        }
    }
    best.map(|(id, _)| id.clone())
}

/// The `n` highest-scoring categories, truncated to the map size.
pub fn resolve_top_n(scores: &ScoreMap, n: usize) -> Vec<CategoryId> {
    rank(scores)
        .into_iter()
        .take(n)
        .map(|(id, _)| id)
        .collect()
}

/// The winning pole of each dichotomy, in dichotomy order.
///
/// A tied pair resolves to `first`.
///
/// # Errors
///
/// Returns [`ScoringError::UnknownCategory`] if a pole is missing from the map.
pub fn resolve_poles(
    scores: &ScoreMap,
    dichotomies: &[Dichotomy],
) -> Result<Vec<CategoryId>, ScoringError> {
    dichotomies
        .iter()
        .map(|pair| {
            let first = scores
                .get(&pair.first)
                .ok_or_else(|| ScoringError::UnknownCategory(pair.first.clone()))?;
            let second = scores
                .get(&pair.second)
                .ok_or_else(|| ScoringError::UnknownCategory(pair.second.clone()))?;
            Ok(if first >= second {
                pair.first.clone()
            } else {
                pair.second.clone()
            })
        })
        .collect()
}

/// Concatenate the winning pole of each dichotomy (e.g. "ESTJ").
pub fn resolve_type_code(
    scores: &ScoreMap,
    dichotomies: &[Dichotomy],
) -> Result<String, ScoringError> {
    Ok(resolve_poles(scores, dichotomies)?.concat())
}
