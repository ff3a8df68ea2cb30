//! Per-run score accumulation.
//!
//! A [`ScoreMap`] holds one entry per known category, in canonical
//! definition order. Entries are created once at initialization; applying a
//! choice only ever adds to an existing entry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{CategoryId, Choice};
use crate::error::ScoringError;

/// Running per-category tally for one assessment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
    scores: IndexMap<CategoryId, u32>,
}

impl ScoreMap {
    /// Zero-initialize every supplied category, preserving order.
    ///
    /// A repeated id keeps its first position.
    pub fn initialize<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CategoryId>,
    {
        let mut scores = IndexMap::new();
        for id in categories {
            scores.entry(id.into()).or_insert(0);
        }
        Self { scores }
    }

    /// Add `choice.weight` to its category and return the new score.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::UnknownCategory`] if the category was not
    /// initialized, or [`ScoringError::Overflow`] if the new score would not
    /// fit. The map is left untouched in both cases.
    pub fn apply_choice(&mut self, choice: &Choice) -> Result<u32, ScoringError> {
        let slot = self
            .scores
            .get_mut(&choice.category)
            .ok_or_else(|| ScoringError::UnknownCategory(choice.category.clone()))?;
        *slot = slot
            .checked_add(choice.weight)
            .ok_or_else(|| ScoringError::Overflow(choice.category.clone()))?;
        Ok(*slot)
    }

    pub fn get(&self, category: &str) -> Option<u32> {
        self.scores.get(category).copied()
    }

    /// Canonical position of a category, used for tie-breaking.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.scores.get_index_of(category)
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, u32)> {
        self.scores.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all scores.
    pub fn total(&self) -> u64 {
        self.scores.values().map(|&v| u64::from(v)).sum()
    }

    /// Zero every entry, keeping the key set and order.
    pub fn reset(&mut self) {
        for value in self.scores.values_mut() {
            *value = 0;
        }
    }
}
