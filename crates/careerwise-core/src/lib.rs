//! # CareerWise Core Library
//!
//! This library provides the core logic behind the CareerWise career guidance
//! app. Every operation is available through the standalone `careerwise` CLI,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Assessments**: One data-driven scoring engine shared by the interest,
//!   personality, learning-style and values quizzes
//! - **Storage**: JSON key-value persistence for the profile, session and chat
//!   transcript, plus TOML-based configuration
//! - **Auth**: Backend authentication with an explicit, tagged local fallback
//!
//! ## Key Components
//!
//! - [`AssessmentRun`]: Answer-by-answer assessment state machine
//! - [`AssessmentDefinition`]: Category table, question bank and resolution rule
//! - [`ProfileStore`]: Persisted user profile with merged assessment results
//! - [`ChatTranscriptStore`]: Persisted chat history
//! - [`AuthService`]: Sign-in, sign-out and session persistence
//! - [`Config`]: Application configuration management

pub mod api;
pub mod assessment;
pub mod auth;
pub mod error;
pub mod storage;

pub use api::ApiClient;
pub use assessment::{
    AssessmentDefinition, AssessmentKind, AssessmentResult, AssessmentRun, Category, CategoryId,
    Choice, Question, Resolution, ScoreMap,
};
pub use auth::{AuthMode, AuthOutcome, AuthService, AuthUser, FallbackReason};
pub use error::{
    ApiError, AuthError, ConfigError, CoreError, DefinitionError, RunError, ScoringError,
    StoreError,
};
pub use storage::{ChatTranscriptStore, Config, FileStore, KeyValueStore, MemoryStore, ProfileStore};
