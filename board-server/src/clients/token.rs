//! POS token manager
//!
//! Holds the bearer token for the POS/auth service and validates its
//! expiry before every use. How tokens are rotated is the auth service's
//! concern; callers here only ever see a currently-valid token or an
//! authentication error.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
struct AuthToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AuthToken {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds
    expires_in: i64,
}

/// Token holder shared by the POS clients
#[derive(Debug, Clone)]
pub struct TokenManager {
    inner: Arc<RwLock<Option<AuthToken>>>,
    use_mock: bool,
    auth_url: String,
    http: reqwest::Client,
}

impl TokenManager {
    pub fn new(use_mock: bool, auth_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            use_mock,
            auth_url: auth_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Whether the dev-mode mock token source is active
    pub fn use_mock(&self) -> bool {
        self.use_mock
    }

    /// Return a currently-valid token value, acquiring one if needed
    ///
    /// Fails with `TokenExpired` when the auth service rejects us and with
    /// `Upstream` when it cannot be reached.
    pub async fn ensure_token(&self) -> AppResult<String> {
        {
            let guard = self.inner.read().await;
            if let Some(token) = guard.as_ref()
                && !token.is_expired()
            {
                return Ok(token.value.clone());
            }
        }

        let token = if self.use_mock {
            self.mint_mock_token()
        } else {
            self.request_token().await?
        };
        let value = token.value.clone();
        *self.inner.write().await = Some(token);
        Ok(value)
    }

    /// Whether a valid (unexpired) token can be presented right now
    pub async fn is_authenticated(&self) -> bool {
        self.ensure_token().await.is_ok()
    }

    fn mint_mock_token(&self) -> AuthToken {
        AuthToken {
            value: format!("mock-token-{}", Uuid::new_v4()),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    async fn request_token(&self) -> AppResult<AuthToken> {
        let url = format!("{}/auth/token", self.auth_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Token request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::TokenExpired);
        }
        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Token service returned {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Malformed token response: {}", e)))?;
        Ok(AuthToken {
            value: body.access_token,
            expires_at: Utc::now() + Duration::seconds(body.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_manager_authenticates_and_reuses_the_token() {
        let manager = TokenManager::new(true, "http://localhost:8005");
        let first = manager.ensure_token().await.unwrap();
        let second = manager.ensure_token().await.unwrap();
        assert_eq!(first, second);
        assert!(manager.is_authenticated().await);
    }

    #[test]
    fn expired_token_is_detected() {
        let token = AuthToken {
            value: "t".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        };
        assert!(token.is_expired());
    }
}
