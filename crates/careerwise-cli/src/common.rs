//! Shared plumbing for CLI commands.

use careerwise_core::auth::HttpAuthGateway;
use careerwise_core::{ApiClient, AuthService, Config, FileStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// The on-disk key-value store in the data directory.
pub fn open_store() -> Result<FileStore, Box<dyn std::error::Error>> {
    Ok(FileStore::open_default()?)
}

/// Single-threaded runtime for one command's network calls.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn auth_service(
    config: &Config,
    store: FileStore,
) -> Result<AuthService<HttpAuthGateway, FileStore>, Box<dyn std::error::Error>> {
    let client = ApiClient::from_config(&config.api)?;
    Ok(AuthService::new(
        HttpAuthGateway::new(client),
        store,
        config.auth.mode,
    ))
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
