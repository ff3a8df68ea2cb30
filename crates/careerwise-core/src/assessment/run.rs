//! Assessment run state machine.
//!
//! A run moves from `InProgress(0, zeroed)` through one `answer` per
//! question to `Completed(result)`. `retake` returns to the initial state
//! from anywhere. The caller can only ever answer the current question, so
//! questions are answered in order and exactly once per run.

use serde::Serialize;

use super::result::AssessmentResult;
use super::scoring::ScoreMap;
use super::types::{AssessmentDefinition, Question};
use crate::error::{DefinitionError, RunError};

/// Current state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    InProgress {
        current_index: usize,
        scores: ScoreMap,
    },
    Completed(AssessmentResult),
}

/// Progress information for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunProgress {
    /// Number of questions answered so far.
    pub answered: usize,
    /// Total number of questions.
    pub total: usize,
    pub is_complete: bool,
}

impl RunProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.answered * 100 / self.total) as u32
    }
}

/// One user's pass through one assessment.
#[derive(Debug, Clone)]
pub struct AssessmentRun<'d> {
    definition: &'d AssessmentDefinition,
    state: RunState,
    /// Selected choice index per answered question.
    answers: Vec<usize>,
}

impl<'d> AssessmentRun<'d> {
    /// Start a run after checking the definition can be scored.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found in the definition.
    pub fn start(definition: &'d AssessmentDefinition) -> Result<Self, DefinitionError> {
        definition.validate()?;
        Ok(Self {
            definition,
            state: Self::initial_state(definition),
            answers: Vec::with_capacity(definition.question_count()),
        })
    }

    fn initial_state(definition: &AssessmentDefinition) -> RunState {
        RunState::InProgress {
            current_index: 0,
            scores: ScoreMap::initialize(definition.category_ids()),
        }
    }

    pub fn definition(&self) -> &'d AssessmentDefinition {
        self.definition
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The question awaiting an answer, if the run is in progress.
    pub fn current_question(&self) -> Option<&'d Question> {
        match &self.state {
            RunState::InProgress { current_index, .. } => {
                self.definition.questions.get(*current_index)
            }
            RunState::Completed(_) => None,
        }
    }

    /// Index of the current question, or the question count once completed.
    pub fn current_index(&self) -> usize {
        match &self.state {
            RunState::InProgress { current_index, .. } => *current_index,
            RunState::Completed(_) => self.definition.question_count(),
        }
    }

    /// Answer the current question with the choice at `choice_index`.
    ///
    /// Returns `Ok(Some(next_question))` while questions remain, or
    /// `Ok(None)` once the run has completed and a result is available.
    pub fn answer(&mut self, choice_index: usize) -> Result<Option<&'d Question>, RunError> {
        let definition = self.definition;
        let (current_index, scores) = match &mut self.state {
            RunState::InProgress {
                current_index,
                scores,
            } => (current_index, scores),
            RunState::Completed(_) => return Err(RunError::AlreadyCompleted),
        };

        let question = &definition.questions[*current_index];
        let choice = question
            .choices
            .get(choice_index)
            .ok_or(RunError::InvalidChoice {
                question: *current_index,
                choice: choice_index,
                available: question.choices.len(),
            })?;

        scores.apply_choice(choice)?;
        self.answers.push(choice_index);

        if *current_index + 1 < definition.question_count() {
            *current_index += 1;
            tracing::debug!(
                kind = %definition.kind,
                question = *current_index,
                "advanced to next question"
            );
            return Ok(definition.questions.get(*current_index));
        }

        let final_scores = std::mem::take(scores);
        let result = AssessmentResult::resolve(definition, final_scores)?;
        tracing::info!(
            kind = %definition.kind,
            top = ?result.top,
            "assessment completed"
        );
        self.state = RunState::Completed(result);
        Ok(None)
    }

    /// Abandon or finish the current pass and start over with zeroed scores.
    pub fn retake(&mut self) {
        self.state = Self::initial_state(self.definition);
        self.answers.clear();
        tracing::debug!(kind = %self.definition.kind, "assessment reset for retake");
    }

    /// Live scores while in progress, final scores once completed.
    pub fn scores(&self) -> &ScoreMap {
        match &self.state {
            RunState::InProgress { scores, .. } => scores,
            RunState::Completed(result) => &result.scores,
        }
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.state {
            RunState::Completed(result) => Some(result),
            RunState::InProgress { .. } => None,
        }
    }

    /// Consume the run, yielding the result if it completed.
    pub fn into_result(self) -> Option<AssessmentResult> {
        match self.state {
            RunState::Completed(result) => Some(result),
            RunState::InProgress { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, RunState::Completed(_))
    }

    /// Selected choice indices, in question order.
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn progress(&self) -> RunProgress {
        RunProgress {
            answered: self.answers.len(),
            total: self.definition.question_count(),
            is_complete: self.is_complete(),
        }
    }
}
