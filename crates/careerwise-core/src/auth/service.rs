//! Session management over a gateway and the local key-value store.

use std::future::Future;

use super::gateway::{AuthGateway, LocalAuthGateway};
use super::{AuthMode, AuthOutcome, AuthUser, FallbackReason, ProfileUpdate, Session};
use crate::error::{ApiError, AuthError, StoreError};
use crate::storage::{keys, KeyValueStore};

/// Keys cleared on sign-out.
const SESSION_KEYS: [&str; 5] = [
    keys::TOKEN,
    keys::USER,
    keys::ONBOARDING_COMPLETED,
    keys::USER_PROFILE,
    keys::NEEDS_ONBOARDING,
];

/// Signs users in and out and keeps the token and user persisted.
///
/// Whether a call may be served by the local mock gateway is decided by
/// [`AuthMode`]; a rejected credential never falls back.
#[derive(Debug)]
pub struct AuthService<G, S> {
    remote: G,
    store: S,
    mode: AuthMode,
}

impl<G: AuthGateway, S: KeyValueStore> AuthService<G, S> {
    pub fn new(remote: G, store: S, mode: AuthMode) -> Self {
        Self {
            remote,
            store,
            mode,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    fn local(&self) -> LocalAuthGateway<&S> {
        LocalAuthGateway::new(&self.store)
    }

    /// Run `call` against the backend unless the mode says otherwise.
    ///
    /// `Ok(Err(reason))` means the caller should serve the request locally.
    async fn try_remote<T>(
        &self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<Result<T, FallbackReason>, AuthError> {
        if self.mode == AuthMode::LocalOnly {
            return Ok(Err(FallbackReason::LocalMode));
        }
        match call.await {
            Ok(value) => Ok(Ok(value)),
            Err(err) if err.is_unreachable() && self.mode == AuthMode::RemoteWithFallback => {
                tracing::warn!(error = %err, "auth backend unreachable, using local session");
                Ok(Err(FallbackReason::BackendUnreachable(err.to_string())))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn store_session(&self, session: &Session) -> Result<(), StoreError> {
        self.store.set(keys::TOKEN, &session.token)?;
        self.store.set_json(keys::USER, &session.user)?;
        if session.user.onboarding_completed() {
            self.store.remove(keys::NEEDS_ONBOARDING)?;
        } else {
            self.store.set(keys::NEEDS_ONBOARDING, "true")?;
        }
        Ok(())
    }

    fn clear_auth_data(&self) -> Result<(), StoreError> {
        self.store.remove(keys::TOKEN)?;
        self.store.remove(keys::USER)?;
        tracing::info!("auth data cleared");
        Ok(())
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthOutcome<AuthUser>, AuthError> {
        let outcome = match self
            .try_remote(self.remote.sign_up(email, password, full_name))
            .await?
        {
            Ok(session) => AuthOutcome::Remote(session),
            Err(reason) => AuthOutcome::Local {
                value: self.local().sign_up(email, password, full_name).await?,
                reason,
            },
        };
        self.store_session(outcome.value())?;
        tracing::info!(email, local = outcome.is_local(), "signed up");
        Ok(outcome.map(|s| s.user))
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome<AuthUser>, AuthError> {
        let outcome = match self.try_remote(self.remote.sign_in(email, password)).await? {
            Ok(session) => AuthOutcome::Remote(session),
            Err(reason) => AuthOutcome::Local {
                value: self.local().sign_in(email, password).await?,
                reason,
            },
        };
        self.store_session(outcome.value())?;
        tracing::info!(email, local = outcome.is_local(), "signed in");
        Ok(outcome.map(|s| s.user))
    }

    /// Sign out. The server call is best-effort; local session data is
    /// always cleared.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(token) = self.token()? {
            if self.mode != AuthMode::LocalOnly {
                if let Err(e) = self.remote.sign_out(&token).await {
                    tracing::warn!(error = %e, "server sign-out failed");
                }
            }
        }
        for key in SESSION_KEYS {
            self.store.remove(key)?;
        }
        tracing::info!("signed out");
        Ok(())
    }

    /// The signed-in user, or `None` without a valid session.
    ///
    /// A token the backend rejects is discarded.
    pub async fn current_user(&self) -> Result<Option<AuthOutcome<AuthUser>>, AuthError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        match self.try_remote(self.remote.current_user(&token)).await {
            Ok(Ok(user)) => {
                self.store.set_json(keys::USER, &user)?;
                Ok(Some(AuthOutcome::Remote(user)))
            }
            Ok(Err(reason)) => match self.local().current_user(&token).await {
                Ok(user) => Ok(Some(AuthOutcome::Local {
                    value: user,
                    reason,
                })),
                Err(ApiError::Status { .. }) => Ok(None),
                Err(e) => Err(e.into()),
            },
            Err(AuthError::Rejected(detail)) => {
                tracing::info!(%detail, "token rejected");
                self.clear_auth_data()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<AuthOutcome<AuthUser>, AuthError> {
        let token = self.token()?.ok_or(AuthError::NotAuthenticated)?;
        let outcome = match self
            .try_remote(self.remote.update_profile(&token, update))
            .await?
        {
            Ok(user) => AuthOutcome::Remote(user),
            Err(reason) => {
                let value = match self.local().update_profile(&token, update).await {
                    Err(ApiError::Status { .. }) => return Err(AuthError::NoStoredUser),
                    other => other?,
                };
                AuthOutcome::Local { value, reason }
            }
        };
        self.store.set_json(keys::USER, outcome.value())?;
        Ok(outcome)
    }

    /// Swap the stored token for a fresh one, or `None` without a session.
    ///
    /// A rejected refresh clears the session.
    pub async fn refresh_token(&self) -> Result<Option<AuthOutcome<String>>, AuthError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let outcome = match self.try_remote(self.remote.refresh_token(&token)).await {
            Ok(Ok(fresh)) => AuthOutcome::Remote(fresh),
            Ok(Err(reason)) => AuthOutcome::Local {
                value: self.local().refresh_token(&token).await?,
                reason,
            },
            Err(AuthError::Rejected(detail)) => {
                tracing::info!(%detail, "token refresh rejected");
                self.clear_auth_data()?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        self.store.set(keys::TOKEN, outcome.value())?;
        Ok(Some(outcome))
    }

    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(keys::TOKEN)
    }

    /// User saved by the last successful auth call. Unreadable records
    /// count as absent.
    pub fn stored_user(&self) -> Result<Option<AuthUser>, StoreError> {
        match self.store.get_json(keys::USER) {
            Err(StoreError::Corrupt { .. }) => Ok(None),
            other => other,
        }
    }

    pub fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.token()?.is_some())
    }
}
