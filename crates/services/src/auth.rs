//! Current-user identity and sign-out, delegated to an auth provider.

use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use prep_core::model::{UserId, UserSession};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::error::AuthError;

/// Source of the signed-in identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The provider's view of the current user, `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot be reached.
    async fn current_session(&self) -> Result<Option<UserSession>, AuthError>;

    /// End the provider-side session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider rejects the request.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Provider for the local store: the session is whatever was configured at launch.
#[derive(Default)]
pub struct LocalAuth {
    session: Mutex<Option<UserSession>>,
}

impl LocalAuth {
    #[must_use]
    pub fn new(session: Option<UserSession>) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn current_session(&self) -> Result<Option<UserSession>, AuthError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| AuthError::State(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| AuthError::State(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct RemoteAuthConfig {
    pub base_url: String,
    pub api_key: String,
    pub access_token: Option<String>,
}

/// Provider backed by the hosted auth endpoints (`/auth/v1`).
#[derive(Clone)]
pub struct RemoteAuth {
    client: Client,
    config: RemoteAuthConfig,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteAuth {
    #[must_use]
    pub fn new(config: RemoteAuthConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{path}",
            self.config.base_url.trim().trim_end_matches('/')
        )
    }

    fn token(&self) -> Option<&str> {
        self.config
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }
}

#[async_trait]
impl AuthProvider for RemoteAuth {
    async fn current_session(&self) -> Result<Option<UserSession>, AuthError> {
        let Some(token) = self.token() else {
            return Ok(None);
        };
        let response = self
            .authorized(self.client.get(self.endpoint("user")), token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::info!("access token rejected; continuing signed out");
                Ok(None)
            }
            status if !status.is_success() => Err(AuthError::HttpStatus(status)),
            _ => {
                let user: AuthUser = response.json().await?;
                Ok(Some(UserSession::new(
                    user.id,
                    user.email.unwrap_or_default(),
                )))
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(token) = self.token() else {
            return Ok(());
        };
        let response = self
            .authorized(self.client.post(self.endpoint("logout")), token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AuthError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

/// The app's explicit session: initialised once at startup, read by views and
/// cleared on sign-out.
#[derive(Clone)]
pub struct SessionContext {
    provider: Arc<dyn AuthProvider>,
    current: Arc<RwLock<Option<UserSession>>>,
}

impl SessionContext {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Ask the provider for the current user and remember the answer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot be reached; the context stays
    /// signed out in that case.
    pub async fn init(&self) -> Result<Option<UserSession>, AuthError> {
        let session = self.provider.current_session().await?;
        self.replace(session.clone())?;
        if let Some(session) = &session {
            tracing::info!(email = session.email(), "session restored");
        }
        Ok(session)
    }

    #[must_use]
    pub fn current(&self) -> Option<UserSession> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Clear the local session, then tell the provider.
    ///
    /// The local session is cleared even when the provider call fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider sign-out fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.replace(None)?;
        self.provider.sign_out().await.inspect_err(|e| {
            tracing::warn!(error = %e, "provider sign-out failed");
        })
    }

    fn replace(&self, session: Option<UserSession>) -> Result<(), AuthError> {
        let mut guard = self
            .current
            .write()
            .map_err(|e| AuthError::State(e.to_string()))?;
        *guard = session;
        Ok(())
    }
}
