pub mod chat;
mod config;
pub mod kv;
pub mod profile;

pub use chat::{ChatState, ChatTranscriptStore, Message, SenderType};
pub use config::{ApiConfig, AuthConfig, ChatConfig, Config};
pub use kv::{keys, FileStore, KeyValueStore, MemoryStore};
pub use profile::{AssessmentRecord, ProfileStore, UserProfile, CURRENT_SCHEMA_VERSION};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/careerwise[-dev]/` based on CAREERWISE_ENV.
///
/// Set CAREERWISE_ENV=dev to use the development data directory, or
/// CAREERWISE_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("CAREERWISE_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("CAREERWISE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("careerwise-dev")
            } else {
                base_dir.join("careerwise")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
