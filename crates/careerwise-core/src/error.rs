//! Core error types for careerwise-core.
//!
//! Each concern gets its own thiserror enum; [`CoreError`] wraps them all
//! for callers that only need to report a failure.

use std::path::PathBuf;
use thiserror::Error;

use crate::assessment::CategoryId;

/// Core error type for careerwise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed assessment definition
    #[error("Assessment definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// Scoring errors
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Assessment run transition errors
    #[error("Assessment run error: {0}")]
    Run(#[from] RunError),

    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while applying a choice to a score map.
///
/// These indicate a broken assessment definition, never bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// A choice referenced a category that was never initialized.
    #[error("unknown category '{0}'")]
    UnknownCategory(CategoryId),

    /// Adding a choice's weight would exceed the score range.
    #[error("score for category '{0}' overflowed")]
    Overflow(CategoryId),
}

/// Structural problems in an assessment definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("assessment '{0}' has no questions")]
    NoQuestions(String),

    #[error("assessment '{0}' defines no categories")]
    NoCategories(String),

    #[error("question {index} has {count} choice(s); at least 2 are required")]
    TooFewChoices { index: usize, count: usize },

    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(CategoryId),

    #[error("question {question} choice {choice} references unknown category '{category}'")]
    UnknownCategory {
        question: usize,
        choice: usize,
        category: CategoryId,
    },

    #[error("question {question} choice {choice} has zero weight")]
    ZeroWeight { question: usize, choice: usize },

    #[error("question {question} choice {choice} has weight {weight}; the maximum is {max}")]
    WeightTooLarge {
        question: usize,
        choice: usize,
        weight: u32,
        max: u32,
    },

    #[error("top-N resolution requires n >= 1")]
    EmptyTopN,

    #[error("dichotomy pole '{0}' is not a defined category")]
    UnknownPole(CategoryId),

    #[error("failed to parse assessment definition: {0}")]
    Parse(String),

    #[error("failed to read assessment definition from {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Invalid transitions on an assessment run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The run already produced a result; retake first.
    #[error("assessment already completed; retake to answer again")]
    AlreadyCompleted,

    /// The selected index is not a choice of the current question.
    #[error("choice {choice} is not valid for question {question} ({available} choices)")]
    InvalidChoice {
        question: usize,
        choice: usize,
        available: usize,
    },

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the backing file
    #[error("Failed to read store at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the backing file
    #[error("Failed to write store at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be decoded
    #[error("Corrupt value under key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Persisted profile was written by a newer version
    #[error("Unsupported profile schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors from the HTTP API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend could not be reached (connect failure or timeout).
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Base URL or endpoint could not be joined into a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl ApiError {
    /// Whether this failure means the backend is not available at all,
    /// as opposed to rejecting the request.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unreachable(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No token is stored.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The backend rejected the request (bad credentials, expired token).
    #[error("{0}")]
    Rejected(String),

    /// The backend was unreachable and fallback is disabled.
    #[error("Authentication backend unreachable: {0}")]
    Unreachable(String),

    /// No user record is stored locally.
    #[error("No current user found")]
    NoStoredUser,

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unreachable(msg) => AuthError::Unreachable(msg),
            ApiError::Status { detail, .. } => AuthError::Rejected(detail),
            other => AuthError::Api(other),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
