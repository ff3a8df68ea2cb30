//! Integration tests for persisting assessment results and chat history
//! through the file-backed store.

use careerwise_core::assessment::catalog;
use careerwise_core::storage::{keys, Message, SenderType, CURRENT_SCHEMA_VERSION};
use careerwise_core::{
    AssessmentKind, AssessmentRun, ChatTranscriptStore, FileStore, KeyValueStore, ProfileStore,
};
use tempfile::TempDir;

#[test]
fn test_completed_runs_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    for kind in [AssessmentKind::Values, AssessmentKind::Personality] {
        let def = catalog::builtin(kind);
        let mut run = AssessmentRun::start(&def).unwrap();
        while run.current_question().is_some() {
            run.answer(0).unwrap();
        }
        let profiles = ProfileStore::new(FileStore::new(&path));
        profiles.record_result(run.result().unwrap()).unwrap();
    }

    let profile = ProfileStore::new(FileStore::new(&path)).load().unwrap();
    assert_eq!(profile.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(
        profile
            .assessment(AssessmentKind::Values)
            .map(|r| r.top.clone()),
        Some(vec![
            "achievement".to_string(),
            "creativity".to_string(),
            "leadership".to_string()
        ])
    );
    assert_eq!(
        profile
            .assessment(AssessmentKind::Personality)
            .and_then(|r| r.type_code.clone()),
        Some("ESTJ".to_string())
    );
}

#[test]
fn test_profile_chat_and_session_share_one_file() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));

    let chat = ChatTranscriptStore::new(&store);
    chat.add_message(Message::user("What careers suit an ESTJ?"))
        .unwrap();
    chat.add_message(Message::assistant("Project management is a common fit."))
        .unwrap();

    let profiles = ProfileStore::new(&store);
    profiles.mark_onboarding_completed().unwrap();
    store.set(keys::TOKEN, "tok").unwrap();

    assert_eq!(
        store.keys().unwrap(),
        vec![
            keys::ONBOARDING_COMPLETED.to_string(),
            keys::TOKEN.to_string(),
            keys::USER_PROFILE.to_string(),
            keys::CHAT.to_string(),
        ]
    );

    profiles.clear().unwrap();
    let messages = chat.messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender_type, SenderType::Assistant);
}
