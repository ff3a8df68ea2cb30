//! The resolved, read-only outcome of a completed assessment run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resolver;
use super::scoring::ScoreMap;
use super::types::{AssessmentDefinition, AssessmentKind, Category, CategoryId, Resolution};
use crate::error::ScoringError;

/// Final result of an assessment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub kind: AssessmentKind,
    /// Final tally in canonical category order.
    pub scores: ScoreMap,
    /// Every category, highest score first.
    pub ranking: Vec<CategoryId>,
    /// Headline categories: the top one, the top N, or the winning poles.
    pub top: Vec<CategoryId>,
    /// Four-letter style code for dichotomy-based assessments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentResult {
    /// Resolve a completed score map according to the definition's rule.
    pub fn resolve(
        definition: &AssessmentDefinition,
        scores: ScoreMap,
    ) -> Result<Self, ScoringError> {
        let ranking: Vec<CategoryId> = resolver::rank(&scores)
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        let (top, type_code) = match &definition.resolution {
            Resolution::Top => (resolver::resolve_top(&scores).into_iter().collect(), None),
            Resolution::TopN { n } => (resolver::resolve_top_n(&scores, *n), None),
            Resolution::TypeCode { dichotomies } => {
                let poles = resolver::resolve_poles(&scores, dichotomies)?;
                let code = poles.concat();
                (poles, Some(code))
            }
        };

        Ok(Self {
            kind: definition.kind,
            scores,
            ranking,
            top,
            type_code,
            completed_at: Utc::now(),
        })
    }

    /// The single best category (first headline entry).
    pub fn primary(&self) -> Option<&CategoryId> {
        self.top.first()
    }

    /// Headline categories with their display metadata.
    pub fn top_categories<'d>(&self, definition: &'d AssessmentDefinition) -> Vec<&'d Category> {
        self.top
            .iter()
            .filter_map(|id| definition.category(id))
            .collect()
    }

    /// Score of the given category as a percentage of all points awarded.
    pub fn share(&self, category: &str) -> u32 {
        let total = self.scores.total();
        if total == 0 {
            return 0;
        }
        let score = u64::from(self.scores.get(category).unwrap_or(0));
        // score <= total, so the quotient is at most 100.
        (score * 100 / total) as u32
    }
}
