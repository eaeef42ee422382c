//! Users service
//!
//! Registration and login run against the identity provider first and the
//! local users table second.

use crate::crypto;
use crate::database::{Repository, User};
use crate::error::{AppError, Result};
use crate::integrations::IdentityProvider;
use crate::validation;
use std::sync::Arc;

/// Service for user accounts
#[derive(Clone)]
pub struct UsersService {
    repo: Repository,
    identity: Arc<dyn IdentityProvider>,
}

impl UsersService {
    pub fn new(repo: Repository, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { repo, identity }
    }

    /// Register a new account.
    ///
    /// The identity provider account is created first; if that fails
    /// nothing is written locally. A local failure after the provider
    /// succeeded is reported with the account left on the provider side.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let name = validation::require_text("Name", name)?;
        let email = validation::require_email(email)?;
        validation::require_password(password)?;

        tracing::info!("Registering user: {}", email);

        let account = self.identity.create_account(&email, password).await?;
        let password_hash = crypto::hash_password(password)?;

        match self.repo.create_user(&name, &email, &password_hash).await {
            Ok(user) => {
                tracing::info!("User registered: {} (identity {})", user.id, account.uid);
                Ok(user)
            }
            Err(e) => {
                tracing::error!(
                    "Identity account {} created but local profile failed: {}",
                    account.uid,
                    e
                );
                Err(AppError::Generic(format!(
                    "Account for {} was created with the identity provider but the profile could not be saved: {}",
                    email, e
                )))
            }
        }
    }

    /// Authenticate and load the local profile
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = validation::require_email(email)?;
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let account = self.identity.sign_in(&email, password).await?;

        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User", &email))?;

        tracing::info!("User logged in: {} (identity {})", user.id, account.uid);
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.repo.get_user(id).await
    }

    /// Change name and/or email; at least one must be given.
    ///
    /// Email changes are refused while accounts live with a remote identity
    /// provider, since sign-in there would still expect the old address.
    pub async fn update_profile(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User> {
        if name.is_none() && email.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        let name = name
            .map(|n| validation::require_text("Name", n))
            .transpose()?;
        let email = email.map(validation::require_email).transpose()?;

        if email.is_some() && !self.identity.uses_local_credentials() {
            return Err(AppError::validation(
                "Email cannot be changed here while accounts are managed by the identity provider",
            ));
        }

        let user = self
            .repo
            .update_user_profile(id, name.as_deref(), email.as_deref())
            .await?;

        tracing::info!("Profile updated: {}", id);
        Ok(user)
    }
}
