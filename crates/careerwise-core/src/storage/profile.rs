//! Persisted user profile with assessment results merged in.
//!
//! The profile lives under the `careerwise_user_profile` key as versioned
//! JSON. Records without a version predate versioning and are upgraded on
//! load; records from a newer schema are refused rather than misread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::kv::{keys, KeyValueStore};
use crate::assessment::{AssessmentKind, AssessmentResult, CategoryId, ScoreMap};
use crate::error::StoreError;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Stored summary of one completed assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub kind: AssessmentKind,
    pub top: Vec<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    pub scores: ScoreMap,
    pub completed_at: DateTime<Utc>,
}

impl From<&AssessmentResult> for AssessmentRecord {
    fn from(result: &AssessmentResult) -> Self {
        Self {
            kind: result.kind,
            top: result.top.clone(),
            type_code: result.type_code.clone(),
            scores: result.scores.clone(),
            completed_at: result.completed_at,
        }
    }
}

/// The locally persisted user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub schema_version: u32,
    /// Latest result per assessment, keyed by assessment slug.
    #[serde(default)]
    pub assessments: BTreeMap<String, AssessmentRecord>,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            assessments: BTreeMap::new(),
            onboarding_completed: false,
            updated_at: None,
        }
    }
}

impl UserProfile {
    /// Replace the record for the result's assessment kind.
    pub fn merge_result(&mut self, result: &AssessmentResult) {
        self.assessments
            .insert(result.kind.as_str().to_string(), AssessmentRecord::from(result));
        self.updated_at = Some(Utc::now());
    }

    pub fn assessment(&self, kind: AssessmentKind) -> Option<&AssessmentRecord> {
        self.assessments.get(kind.as_str())
    }

    fn migrate(mut self) -> Result<Self, StoreError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StoreError::UnsupportedSchema {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        if self.schema_version == 0 {
            tracing::info!("upgrading unversioned profile to schema {CURRENT_SCHEMA_VERSION}");
            self.schema_version = CURRENT_SCHEMA_VERSION;
        }
        Ok(self)
    }
}

/// Narrow persistence interface for the user profile.
#[derive(Debug)]
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the profile, or an empty one if none is stored.
    pub fn load(&self) -> Result<UserProfile, StoreError> {
        match self.store.get_json::<UserProfile>(keys::USER_PROFILE)? {
            Some(profile) => profile.migrate(),
            None => Ok(UserProfile::default()),
        }
    }

    pub fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.store.set_json(keys::USER_PROFILE, profile)
    }

    /// Merge a completed result into the stored profile.
    pub fn record_result(&self, result: &AssessmentResult) -> Result<UserProfile, StoreError> {
        let mut profile = self.load()?;
        profile.merge_result(result);
        self.save(&profile)?;
        tracing::info!(kind = %result.kind, "assessment result saved to profile");
        Ok(profile)
    }

    pub fn mark_onboarding_completed(&self) -> Result<UserProfile, StoreError> {
        let mut profile = self.load()?;
        profile.onboarding_completed = true;
        profile.updated_at = Some(Utc::now());
        self.save(&profile)?;
        self.store.set(keys::ONBOARDING_COMPLETED, "true")?;
        self.store.remove(keys::NEEDS_ONBOARDING)?;
        Ok(profile)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::USER_PROFILE)?;
        self.store.remove(keys::ONBOARDING_COMPLETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{catalog, AssessmentRun};
    use crate::storage::MemoryStore;

    fn completed(kind: AssessmentKind, picks: &[usize]) -> AssessmentResult {
        let def = catalog::builtin(kind);
        let mut run = AssessmentRun::start(&def).unwrap();
        for pick in picks {
            run.answer(*pick).unwrap();
        }
        run.into_result().unwrap()
    }

    #[test]
    fn load_without_stored_profile_is_empty() {
        let store = ProfileStore::new(MemoryStore::new());
        let profile = store.load().unwrap();
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn record_result_merges_and_persists() {
        let store = ProfileStore::new(MemoryStore::new());
        let result = completed(AssessmentKind::LearningStyle, &[2, 3, 3, 2, 2]);
        store.record_result(&result).unwrap();

        let profile = store.load().unwrap();
        let record = profile.assessment(AssessmentKind::LearningStyle).unwrap();
        assert_eq!(record.top, vec!["kinesthetic"]);
        assert!(profile.updated_at.is_some());
    }

    #[test]
    fn retake_replaces_previous_record() {
        let store = ProfileStore::new(MemoryStore::new());
        store
            .record_result(&completed(AssessmentKind::Personality, &[0, 0, 0, 0, 0]))
            .unwrap();
        store
            .record_result(&completed(AssessmentKind::Personality, &[1, 1, 1, 1, 1]))
            .unwrap();

        let profile = store.load().unwrap();
        assert_eq!(profile.assessments.len(), 1);
        assert_eq!(
            profile
                .assessment(AssessmentKind::Personality)
                .and_then(|r| r.type_code.as_deref()),
            Some("INFP")
        );
    }

    #[test]
    fn results_for_different_kinds_coexist() {
        let store = ProfileStore::new(MemoryStore::new());
        store
            .record_result(&completed(AssessmentKind::Values, &[0, 0, 0, 0, 0]))
            .unwrap();
        store
            .record_result(&completed(AssessmentKind::Interest, &[1, 1, 1, 1, 1]))
            .unwrap();
        let profile = store.load().unwrap();
        assert_eq!(
            profile.assessments.keys().cloned().collect::<Vec<_>>(),
            vec!["interest".to_string(), "values".to_string()]
        );
    }

    #[test]
    fn unversioned_profile_is_upgraded() {
        let kv = MemoryStore::new();
        kv.set(keys::USER_PROFILE, r#"{"onboarding_completed":true}"#)
            .unwrap();
        let profile = ProfileStore::new(&kv).load().unwrap();
        assert_eq!(profile.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(profile.onboarding_completed);
    }

    #[test]
    fn newer_schema_is_refused() {
        let kv = MemoryStore::new();
        kv.set(keys::USER_PROFILE, r#"{"schema_version":99}"#).unwrap();
        assert!(matches!(
            ProfileStore::new(&kv).load(),
            Err(StoreError::UnsupportedSchema {
                found: 99,
                supported: CURRENT_SCHEMA_VERSION
            })
        ));
    }

    #[test]
    fn onboarding_and_clear_touch_their_keys() {
        let kv = MemoryStore::new();
        kv.set(keys::NEEDS_ONBOARDING, "true").unwrap();
        let store = ProfileStore::new(&kv);
        assert!(store.mark_onboarding_completed().unwrap().onboarding_completed);
        assert_eq!(kv.get(keys::ONBOARDING_COMPLETED).unwrap().as_deref(), Some("true"));
        assert_eq!(kv.get(keys::NEEDS_ONBOARDING).unwrap(), None);

        store.clear().unwrap();
        assert_eq!(kv.get(keys::USER_PROFILE).unwrap(), None);
        assert_eq!(store.load().unwrap(), UserProfile::default());
    }
}
