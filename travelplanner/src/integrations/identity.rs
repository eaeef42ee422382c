//! Identity providers
//!
//! [`FirebaseIdentityClient`] talks to the Identity Toolkit REST API.
//! [`LocalIdentityProvider`] checks credentials against the local users
//! table and is used when no identity API key is configured.

use super::{build_http_client, require_key, IdentityAccount, IdentityProvider};
use crate::crypto;
use crate::database::Repository;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SERVICE: &str = "Identity";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

pub struct FirebaseIdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirebaseIdentityClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn post_password(&self, action: &str, email: &str, password: &str) -> Result<IdentityAccount> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let url = format!("{}/v1/accounts:{}", self.base_url, action);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| AppError::external(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => format!("HTTP {}", status),
            };
            tracing::warn!("Identity {} failed for {}: {}", action, email, message);
            return Err(AppError::external(SERVICE, message));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| AppError::external(SERVICE, format!("Unexpected response: {}", e)))?;

        Ok(IdentityAccount {
            uid: account.local_id,
            email: account.email,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn create_account(&self, email: &str, password: &str) -> Result<IdentityAccount> {
        self.post_password("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount> {
        self.post_password("signInWithPassword", email, password).await
    }
}

/// Credentials checked against the argon2 hashes in the users table
pub struct LocalIdentityProvider {
    repo: Repository,
}

impl LocalIdentityProvider {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn create_account(&self, email: &str, _password: &str) -> Result<IdentityAccount> {
        if self.repo.find_user_by_email(email).await?.is_some() {
            return Err(AppError::external(SERVICE, "EMAIL_EXISTS"));
        }

        Ok(IdentityAccount {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount> {
        let user = self.repo.find_user_by_email(email).await?;

        match user {
            Some(user) if crypto::verify_password(password, &user.password_hash)? => {
                Ok(IdentityAccount {
                    uid: user.id,
                    email: user.email,
                })
            }
            _ => Err(AppError::external(SERVICE, "INVALID_LOGIN_CREDENTIALS")),
        }
    }

    fn uses_local_credentials(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;
    use crate::error::ErrorKind;

    async fn provider_with_user(email: &str, password: &str) -> LocalIdentityProvider {
        let repo = Repository::new(create_memory_pool().await.unwrap());
        let hash = crypto::hash_password(password).unwrap();
        repo.create_user("Local", email, &hash).await.unwrap();
        LocalIdentityProvider::new(repo)
    }

    #[tokio::test]
    async fn test_local_sign_in() {
        let provider = provider_with_user("me@example.com", "secret1").await;

        let account = provider.sign_in("ME@example.com", "secret1").await.unwrap();
        assert_eq!(account.email, "me@example.com");

        let err = provider.sign_in("me@example.com", "wrong!").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalServiceFailure);

        let err = provider.sign_in("nobody@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalServiceFailure);
    }

    #[tokio::test]
    async fn test_local_create_rejects_existing_email() {
        let provider = provider_with_user("me@example.com", "secret1").await;

        let err = provider
            .create_account("me@example.com", "another1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalServiceFailure);

        let account = provider
            .create_account("new@example.com", "another1")
            .await
            .unwrap();
        assert_eq!(account.email, "new@example.com");
    }
}
