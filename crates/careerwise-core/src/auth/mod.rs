//! Authentication with an explicit local fallback.
//!
//! Every auth operation returns an [`AuthOutcome`] that says whether the
//! backend answered or a local mock session stood in for it, and why.

pub mod gateway;
pub mod service;

pub use gateway::{AuthGateway, HttpAuthGateway, LocalAuthGateway};
pub use service::AuthService;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed-in user as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// One of student, graduate, professional, entrepreneur.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    pub fn onboarding_completed(&self) -> bool {
        self.onboarding_completed.unwrap_or(false)
    }
}

/// Partial profile update. Unset fields leave the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the set fields onto `user`.
    pub fn apply_to(&self, user: &mut AuthUser) {
        fn overlay<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }
        overlay(&mut user.full_name, &self.full_name);
        overlay(&mut user.user_type, &self.user_type);
        overlay(&mut user.career_stage, &self.career_stage);
        overlay(&mut user.experience_level, &self.experience_level);
        overlay(&mut user.primary_goals, &self.primary_goals);
        overlay(&mut user.industry_interests, &self.industry_interests);
        overlay(&mut user.skills, &self.skills);
        overlay(&mut user.location, &self.location);
        overlay(&mut user.bio, &self.bio);
        overlay(&mut user.linkedin_url, &self.linkedin_url);
        overlay(&mut user.portfolio_url, &self.portfolio_url);
    }
}

/// Bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

/// How authentication reaches the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// Backend only; an unreachable backend is an error.
    Remote,
    /// Backend first; mock sessions only when the backend cannot be reached.
    #[default]
    RemoteWithFallback,
    /// Mock sessions only, for development without a backend.
    LocalOnly,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::RemoteWithFallback => write!(f, "remote-with-fallback"),
            Self::LocalOnly => write!(f, "local-only"),
        }
    }
}

/// Why an operation was served locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Configured for local-only auth.
    LocalMode,
    /// The backend could not be reached.
    BackendUnreachable(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalMode => write!(f, "local-only mode"),
            Self::BackendUnreachable(detail) => write!(f, "backend unreachable ({detail})"),
        }
    }
}

/// Result of an auth operation, tagged with where it was served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome<T> {
    Remote(T),
    Local { value: T, reason: FallbackReason },
}

impl<T> AuthOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Remote(value) | Self::Local { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Remote(value) | Self::Local { value, .. } => value,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Remote(_) => None,
            Self::Local { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AuthOutcome<U> {
        match self {
            Self::Remote(value) => AuthOutcome::Remote(f(value)),
            Self::Local { value, reason } => AuthOutcome::Local {
                value: f(value),
                reason,
            },
        }
    }
}
