//! HTTP client for the CareerWise backend.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::auth::{AuthUser, ProfileUpdate};
use crate::error::ApiError;
use crate::storage::ApiConfig;

const USER_AGENT: &str = concat!("careerwise/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Token issued by signup and signin.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: AuthUser,
}

/// Token issued by refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".into()
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub conversation_id: Option<&'a str>,
}

/// Assistant reply from `/chat/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub conversation_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Thin JSON client over the backend's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Self {
            base_url,
            token: None,
            http,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join an endpoint such as `/auth/me` onto the base path.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{endpoint}"))?)
    }

    /// Send a request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Non-2xx responses become [`ApiError::Status`] with the backend's
    /// `detail` message when it sent one. Connection failures and timeouts
    /// become [`ApiError::Unreachable`].
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%method, %url, "api request");

        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(&bytes).unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }

        let raw: &[u8] = if bytes.is_empty() { b"null" } else { &bytes[..] };
        serde_json::from_slice(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn sign_up(&self, req: &SignUpRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/signup", Some(req)).await
    }

    pub async fn sign_in(&self, req: &SignInRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/signin", Some(req)).await
    }

    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .request::<_, ()>(Method::POST, "/auth/signout", None)
            .await?;
        Ok(())
    }

    pub async fn me(&self) -> Result<AuthUser, ApiError> {
        self.request::<_, ()>(Method::GET, "/auth/me", None).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthUser, ApiError> {
        self.request(Method::PUT, "/auth/profile", Some(update)).await
    }

    pub async fn refresh(&self) -> Result<TokenResponse, ApiError> {
        self.request::<_, ()>(Method::POST, "/auth/refresh", None).await
    }

    pub async fn send_chat(&self, req: &ChatRequest<'_>) -> Result<ChatResponse, ApiError> {
        self.request(Method::POST, "/chat/send", Some(req)).await
    }
}

/// Extract `detail` from a FastAPI-style error body.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = client("http://localhost:8000/api/v1");
        assert_eq!(
            api.endpoint_url("/auth/me").unwrap().as_str(),
            "http://localhost:8000/api/v1/auth/me"
        );
        let api = client("http://localhost:8000/api/v1/");
        assert_eq!(
            api.endpoint_url("chat/send").unwrap().as_str(),
            "http://localhost:8000/api/v1/chat/send"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn error_detail_prefers_string_detail() {
        assert_eq!(
            error_detail(br#"{"detail":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            error_detail(br#"{"detail":[{"msg":"field required"}]}"#).as_deref(),
            Some(r#"[{"msg":"field required"}]"#)
        );
        assert_eq!(error_detail(b"<html>oops</html>"), None);
        assert_eq!(error_detail(br#"{"error":"x"}"#), None);
    }

    #[tokio::test]
    async fn request_sends_bearer_and_decodes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/auth/me")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"u1","email":"a@example.com","full_name":"Ada"}"#)
            .create_async()
            .await;

        let api = client(&format!("{}/api/v1", server.url())).with_token("tok-1");
        let user = api.me().await.unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.full_name.as_deref(), Some("Ada"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_maps_to_status_with_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/signin")
            .with_status(401)
            .with_body(r#"{"detail":"Invalid credentials"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/v1/auth/refresh")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let api = client(&format!("{}/api/v1", server.url()));
        let err = api
            .sign_in(&SignInRequest {
                email: "a@example.com",
                password: "wrong",
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status { status: 401, ref detail } if detail == "Invalid credentials"
        ));

        let err = api.refresh().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status { status: 500, ref detail } if detail == "HTTP 500"
        ));
    }

    #[tokio::test]
    async fn empty_success_body_is_accepted_for_signout() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/signout")
            .with_status(204)
            .create_async()
            .await;
        let api = client(&format!("{}/api/v1", server.url())).with_token("t");
        api.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        let api = client("http://127.0.0.1:1/api/v1");
        let err = api.me().await.unwrap_err();
        assert!(err.is_unreachable(), "unexpected error: {err:?}");
    }
}
