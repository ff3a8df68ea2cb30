//! Auth backends.
//!
//! Gateways are stateless between calls: the caller passes the bearer
//! token in and persists whatever comes back.

use chrono::Utc;

use super::{AuthUser, ProfileUpdate, Session};
use crate::api::{ApiClient, SignInRequest, SignUpRequest};
use crate::error::ApiError;
use crate::storage::{keys, KeyValueStore};

/// Every auth backend implements this trait.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Session, ApiError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError>;

    async fn sign_out(&self, token: &str) -> Result<(), ApiError>;

    async fn current_user(&self, token: &str) -> Result<AuthUser, ApiError>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate)
        -> Result<AuthUser, ApiError>;

    /// Exchange `token` for a fresh one.
    async fn refresh_token(&self, token: &str) -> Result<String, ApiError>;
}

/// Gateway backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn authed(&self, token: &str) -> ApiClient {
        self.client.clone().with_token(token)
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Session, ApiError> {
        let resp = self
            .client
            .sign_up(&SignUpRequest {
                email,
                password,
                full_name,
            })
            .await?;
        Ok(Session {
            token: resp.access_token,
            user: resp.user,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let resp = self
            .client
            .sign_in(&SignInRequest { email, password })
            .await?;
        Ok(Session {
            token: resp.access_token,
            user: resp.user,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), ApiError> {
        self.authed(token).sign_out().await
    }

    async fn current_user(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.authed(token).me().await
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<AuthUser, ApiError> {
        self.authed(token).update_profile(update).await
    }

    async fn refresh_token(&self, token: &str) -> Result<String, ApiError> {
        Ok(self.authed(token).refresh().await?.access_token)
    }
}

/// Offline gateway that issues mock sessions.
///
/// Reads and updates the user already stored under `careerwise_user`;
/// it never talks to the network.
#[derive(Debug)]
pub struct LocalAuthGateway<S> {
    store: S,
}

impl<S: KeyValueStore> LocalAuthGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn stored_user(&self) -> Result<AuthUser, ApiError> {
        self.store
            .get_json::<AuthUser>(keys::USER)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .ok_or_else(|| ApiError::Status {
                status: 404,
                detail: "No current user found".into(),
            })
    }
}

/// Mock session in the shape the backend returns.
pub fn mock_session(email: &str, full_name: Option<&str>) -> Session {
    let millis = Utc::now().timestamp_millis();
    Session {
        token: format!("mock_token_{millis}"),
        user: AuthUser {
            id: format!("mock_user_id_{millis}"),
            email: email.to_string(),
            full_name: Some(full_name.unwrap_or("Mock User").to_string()),
            user_type: Some("professional".into()),
            experience_level: Some("mid".into()),
            primary_goals: Some(vec!["Senior Developer".into(), "Team Lead".into()]),
            skills: Some(vec!["JavaScript".into(), "React".into(), "Node.js".into()]),
            industry_interests: Some(vec!["Technology".into(), "AI/ML".into()]),
            onboarding_completed: Some(false),
            ..Default::default()
        },
    }
}

impl<S: KeyValueStore> AuthGateway for LocalAuthGateway<S> {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        full_name: Option<&str>,
    ) -> Result<Session, ApiError> {
        Ok(mock_session(email, full_name))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, ApiError> {
        Ok(mock_session(email, None))
    }

    async fn sign_out(&self, _token: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn current_user(&self, _token: &str) -> Result<AuthUser, ApiError> {
        self.stored_user()
    }

    async fn update_profile(
        &self,
        _token: &str,
        update: &ProfileUpdate,
    ) -> Result<AuthUser, ApiError> {
        let mut user = self.stored_user()?;
        update.apply_to(&mut user);
        Ok(user)
    }

    async fn refresh_token(&self, _token: &str) -> Result<String, ApiError> {
        Ok(format!(
            "mock_refreshed_token_{}",
            Utc::now().timestamp_millis()
        ))
    }
}
