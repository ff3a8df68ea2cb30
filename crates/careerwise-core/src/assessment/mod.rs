//! Data-driven assessment scoring.
//!
//! One generic engine serves every quiz:
//! - [`AssessmentDefinition`]: category table, question bank and resolution rule
//! - [`ScoreMap`]: per-run tally, zero-initialized for every category
//! - [`resolver`]: ranking with deterministic tie-breaks
//! - [`AssessmentRun`]: the answer-by-answer state machine
//! - [`catalog`]: the built-in interest, personality, learning-style and values banks

pub mod catalog;
pub mod resolver;
pub mod result;
pub mod run;
pub mod scoring;
pub mod types;

pub use result::AssessmentResult;
pub use run::{AssessmentRun, RunProgress, RunState};
pub use scoring::ScoreMap;
pub use types::{
    AssessmentDefinition, AssessmentKind, Category, CategoryId, Choice, Dichotomy, Question,
    Resolution, MAX_CHOICE_WEIGHT,
};
